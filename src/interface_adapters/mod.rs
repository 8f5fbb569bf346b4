// Interface adapters: the HTTP client for the booking API and result sinks.

pub mod clients;
pub mod recorder;
