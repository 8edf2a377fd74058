pub mod error;
pub mod stream;
pub mod location;
pub mod safe_string;
pub mod uoid;
pub mod keyring;
pub mod header;
pub mod classes;
pub mod objects;
pub mod registry;
pub mod page;

pub use error::{PrpError, Result};
pub use location::Location;
pub use uoid::{CloneId, Uoid};
pub use keyring::{Key, Keyring};
pub use header::{PageHeader, SUPPORTED_VERSION};
pub use objects::{PlasmaObject, SoundBuffer, StereoChannel};
pub use registry::{Registration, Registry};
pub use page::{OpenOptions, Page};
