use crate::domain::{
    ApiResponse, AvailabilityQuery, Booking, BookingApi, BookingLookup, CreateBookingRequest,
    ListBookingsQuery, TransportError,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

// Thin wrapper around reqwest for the booking API under test. The inner
// client pools connections and is shared by every session.
#[derive(Clone)]
pub struct BookingClient {
    http: Client,
    base_url: Url,
}

impl BookingClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Appends `segments` to the base path, keeping any prefix it carries.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn endpoint_with_query(
        &self,
        segments: &[&str],
        pairs: &[(&str, &str)],
    ) -> Result<Url, TransportError> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut().extend_pairs(pairs);
        Ok(url)
    }
}

#[async_trait]
impl BookingApi for BookingClient {
    async fn available_slots(
        &self,
        query: &AvailabilityQuery,
    ) -> Result<ApiResponse, TransportError> {
        let duration = query.service_duration.to_string();
        let url = self.endpoint_with_query(
            &["bookings", "available"],
            &[
                ("serviceId", query.service_id.as_str()),
                ("date", query.date.as_str()),
                ("serviceDuration", duration.as_str()),
            ],
        )?;
        read_response(self.http.get(url).send().await).await
    }

    async fn create_booking(
        &self,
        request: &CreateBookingRequest,
    ) -> Result<ApiResponse, TransportError> {
        let url = self.endpoint(&["bookings", "create"])?;
        read_response(self.http.post(url).json(request).send().await).await
    }

    async fn list_bookings(
        &self,
        query: &ListBookingsQuery,
    ) -> Result<ApiResponse, TransportError> {
        let limit = query.limit.to_string();
        let url = self.endpoint_with_query(
            &["bookings"],
            &[("userId", query.user_id.as_str()), ("limit", limit.as_str())],
        )?;
        read_response(self.http.get(url).send().await).await
    }

    async fn get_booking(&self, lookup: &BookingLookup) -> Result<ApiResponse, TransportError> {
        let url = self.endpoint_with_query(
            &["bookings", "user"],
            &[
                ("serviceId", lookup.service_id.as_str()),
                ("date", lookup.date.as_str()),
                ("userId", lookup.user_id.as_str()),
                ("bookingId", lookup.booking_id.as_str()),
            ],
        )?;
        read_response(self.http.get(url).send().await).await
    }

    async fn delete_booking(&self, booking: &Booking) -> Result<ApiResponse, TransportError> {
        let url = self.endpoint(&["bookings", "delete"])?;
        read_response(self.http.post(url).json(booking).send().await).await
    }
}

async fn read_response(
    sent: Result<reqwest::Response, reqwest::Error>,
) -> Result<ApiResponse, TransportError> {
    let response = sent.map_err(transport_error)?;
    let status = response.status().as_u16();

    // The status already arrived; an unreadable body just means no data.
    let body = response
        .text()
        .await
        .inspect_err(|e| tracing::debug!(status, error = %e, "failed to read response body"))
        .unwrap_or_default();

    Ok(ApiResponse { status, body })
}

fn transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(err.to_string())
    }
}
