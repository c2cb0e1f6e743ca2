//! 도메인 타입.

pub mod metadata;
pub mod normalize;
pub mod snapshot;

pub use metadata::{InstrumentMetadata, InstrumentRecord, DOMESTIC_NATION_CODE};
pub use normalize::{decorate_change, decorate_ratio, normalize_detail_url};
pub use snapshot::{ChartUrls, OverMarketQuote, RawOverMarketQuote, RawSnapshot, StockSnapshot, TotalInfos};
