//! Defaultbox – fill struct fields from default values declared next to them.
//!
//! A record declares its defaults as field annotations; the engine reads the
//! annotation under its tag key (`default` unless configured otherwise) and
//! coerces the text into the field's type:
//! * scalars take the literal text: `"10"`, `"true"`, `"3.14159"`, `"2024-05-01"`;
//! * sequences take `[v1, v2, ...]`;
//! * mappings take `[k1: v1, ...]` or `{k1: v1, ...}`.
//!
//! Only exported (non-private) fields are touched, and every annotated field is
//! overwritten whatever it held before. Filling is best effort: an annotation
//! that cannot be applied leaves the field alone instead of failing the call.
//!
//! ## Modules
//! * [`record`] – The [`record::Record`] trait, field descriptors and the
//!   [`record!`] macro generating both.
//! * [`datatype`] – Field kinds, the [`datatype::Scalar`] parsers and the
//!   [`datatype::FieldValue`] slots for scalars, `Vec`, `HashMap` and `BTreeMap`.
//! * [`grammar`] – Splitting of collection annotations (positional or strict brackets).
//! * [`engine`] – [`engine::DefaultBox`], the fill operation and its report.
//! * [`settings`] – Tag key, bracket policy and log filter from file/environment.
//!
//! ## Quick Start
//! ```
//! use defaultbox::DefaultBox;
//!
//! defaultbox::record! {
//!     #[derive(Debug, Default)]
//!     pub struct Server {
//!         pub host: String => { default: "localhost" },
//!         pub port: u16 => { default: "8080" },
//!         pub tags: Vec<String> => { default: "[edge, primary]" },
//!     }
//! }
//!
//! let mut server = Server::default();
//! DefaultBox::new(&mut server).fill();
//! assert_eq!(server.host, "localhost");
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.tags, vec!["edge", "primary"]);
//! ```

pub mod datatype;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod record;
pub mod settings;

pub use datatype::{coerce_mapping, coerce_scalar, coerce_sequence, FieldValue, Kind, Scalar};
pub use engine::{DefaultBox, FieldOutcome, FillReport};
pub use error::{DefaultBoxError, Result};
pub use grammar::Brackets;
pub use record::{FieldDescriptor, Record};
pub use settings::Settings;
