pub mod date;
pub mod encoding;
pub mod network;
pub mod numeric;
pub mod string;

pub use date::{DateFormat, Rfc3339Check};
pub use encoding::{Base64Check, JsonCheck};
pub use network::{CidrCheck, HostnameCheck, IpAddressCheck, IpVersion, MacAddressCheck};
pub use numeric::{InRange, IntegerCheck, NumberCheck, PORT_RANGE};
pub use string::{Contains, EmailCheck, OneOf, RegexMatch, StringLength, UuidCheck};
