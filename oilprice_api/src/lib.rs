mod client;
mod crude;
mod errors;
mod eximbank;
mod opinet;
pub mod types;
pub use self::crude::CrudeClient;
pub use self::errors::Error;
pub use self::eximbank::EximbankClient;
pub use self::opinet::OpinetClient;
