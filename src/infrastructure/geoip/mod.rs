//! GeoIP lookups backed by a local MaxMind database.

mod maxmind;

pub use maxmind::MaxMindGeoLookup;
