//! Static description of records whose fields can receive defaults.
//!
//! A [`Record`] exposes one [`FieldDescriptor`] per field, in declaration
//! order, and a visitor handing out each field as a `&mut dyn FieldValue`.
//! The [`record!`](crate::record!) macro generates both from a single struct
//! declaration:
//!
//! ```
//! use std::collections::HashMap;
//! use defaultbox::record::Record;
//!
//! defaultbox::record! {
//!     #[derive(Debug, Default)]
//!     pub struct User {
//!         pub name: String => { default: "Bob" },
//!         pub age: i8 => { default: "10" },
//!         pub hobbies: Vec<String> => { default: "[Football, Basketball]" },
//!         pub scores: HashMap<String, f32> => { default: "{Language: 95.55, Math: 99.50}" },
//!         nickname: String => { default: "never applied" },
//!     }
//! }
//!
//! let mut user = User::default();
//! user.fill_defaults();
//! assert_eq!(user.name, "Bob");
//! assert_eq!(user.hobbies, vec!["Football", "Basketball"]);
//! assert!(user.nickname.is_empty());
//! ```

use crate::datatype::FieldValue;
use crate::engine::DefaultBox;

/// Compile-time facts about one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    /// Visibility as written, e.g. `""`, `"pub"` or `"pub(crate)"`.
    pub visibility: &'static str,
    pub type_name: &'static str,
    /// `(key, text)` pairs in declaration order.
    pub annotations: &'static [(&'static str, &'static str)],
}

impl FieldDescriptor {
    /// A field is exported unless it is private (no visibility or `pub(self)`).
    pub fn is_exported(&self) -> bool {
        let compact: String = self.visibility.split_whitespace().collect();
        !matches!(compact.as_str(), "" | "pub(self)")
    }
    /// First annotation stored under `key`.
    pub fn annotation(&self, key: &str) -> Option<&'static str> {
        self.annotations
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| *text)
    }
}

pub trait Record {
    const TYPE_NAME: &'static str;
    const FIELDS: &'static [FieldDescriptor];

    /// Calls `visit` for every field, in the order of [`Record::FIELDS`].
    fn visit_fields_mut(
        &mut self,
        visit: &mut dyn FnMut(&'static FieldDescriptor, &mut dyn FieldValue),
    );

    fn field(name: &str) -> Option<&'static FieldDescriptor> {
        Self::FIELDS.iter().find(|f| f.name == name)
    }

    /// Fills defaults stored under the `default` key.
    fn fill_defaults(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        DefaultBox::new(&mut *self).fill();
        self
    }
}

/// Declares a struct and implements [`Record`] for it.
///
/// Each field may be followed by `=> { key: "text", ... }` to attach
/// annotations; the engine reads the one under its configured key. Fields of
/// any type are accepted: types without a [`FieldValue`] impl (`Duration`,
/// `char`, nested records, ...) are visited as unsupported and never written.
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty
                $( => { $( $key:ident : $text:literal ),* $(,)? } )?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )*
        }

        impl $crate::record::Record for $name {
            const TYPE_NAME: &'static str = stringify!($name);
            const FIELDS: &'static [$crate::record::FieldDescriptor] = &[
                $(
                    $crate::record::FieldDescriptor {
                        name: stringify!($field),
                        visibility: stringify!($field_vis),
                        type_name: stringify!($field_ty),
                        annotations: &[ $( $( (stringify!($key), $text), )* )? ],
                    },
                )*
            ];

            fn visit_fields_mut(
                &mut self,
                visit: &mut dyn FnMut(
                    &'static $crate::record::FieldDescriptor,
                    &mut dyn $crate::datatype::FieldValue,
                ),
            ) {
                #[allow(unused_imports)]
                use $crate::datatype::{SupportedSlot as _, UnsupportedSlot as _};
                let mut fields = <Self as $crate::record::Record>::FIELDS.iter();
                $(
                    if let Some(descriptor) = fields.next() {
                        visit(
                            descriptor,
                            (&mut $crate::datatype::Slot::new(&mut self.$field)).as_field_value(),
                        );
                    }
                )*
            }
        }
    };
}
