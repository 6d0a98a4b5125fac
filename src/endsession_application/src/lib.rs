pub mod pipeline;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use pipeline::run_stage;
pub use use_cases::decode::{DecodedRequest, decode_logout_request};
pub use use_cases::logout::{LogoutOptions, LogoutTransaction, LogoutUseCase};
