mod number;
pub use self::number::parse_decimal;

mod opinet;
pub use self::opinet::{AvgPriceResponse, AvgPriceResult, OilPrice, ProductCode};

mod eximbank;
pub use self::eximbank::{ExchangeRate, RESULT_OK};

mod crude;
pub use self::crude::RawRecord;
