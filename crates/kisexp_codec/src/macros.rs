//! The `sexp_record!` declaration macro.

/// Declares a record type together with its schema.
///
/// Each mapped field is written `pub name: Type = default => codec`, in the
/// order the fields appear in the file format. Fields after a `;` are
/// runtime-only: they are part of the struct but never decoded or encoded.
///
/// The struct derives `Clone`, `Debug` and `PartialEq`; `Default` is built
/// from the declared defaults. Writing `with hooks` after the tag leaves
/// the [`RecordHooks`](crate::RecordHooks) impl to the caller.
///
/// ```
/// use kisexp_codec::codec::{Flag, Named, OmitDefault, float, string};
/// use kisexp_codec::{Record, sexp_record};
///
/// sexp_record! {
///     /// A copper track.
///     pub struct Track("track") {
///         pub width: f64 = 0.25 => OmitDefault::new(Named::new(float())),
///         pub layer: String = "F.Cu".into() => OmitDefault::new(Named::new(string())),
///         pub locked: bool = false => Flag::new();
///         pub selected: bool = false,
///     }
/// }
///
/// let track = Track::parse("(track (width 0.5) locked)").unwrap();
/// assert_eq!(track.width, 0.5);
/// assert_eq!(track.layer, "F.Cu");
/// assert!(track.locked);
/// ```
#[macro_export]
macro_rules! sexp_record {
    (@hooks $name:ident) => {
        impl $crate::RecordHooks for $name {}
    };

    (@hooks $name:ident, hooks) => {};

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident ($tag:literal) $(with $hooks:ident)? {
            $(
                $(#[$fmeta:meta])*
                pub $field:ident : $fty:ty = $default:expr => $codec:expr
            ),* $(,)?
            $(
                ;
                $(
                    $(#[$rmeta:meta])*
                    pub $rfield:ident : $rty:ty = $rdefault:expr
                ),* $(,)?
            )?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $fty,
            )*
            $($(
                $(#[$rmeta])*
                pub $rfield: $rty,
            )*)?
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self {
                    $($field: $default,)*
                    $($($rfield: $rdefault,)*)?
                }
            }
        }

        impl $crate::Record for $name {
            const TAG: &'static str = $tag;

            fn schema() -> $crate::Result<&'static $crate::Schema<Self>> {
                static SCHEMA: ::std::sync::OnceLock<$crate::Result<$crate::Schema<$name>>> =
                    ::std::sync::OnceLock::new();
                $crate::Schema::cached(&SCHEMA, || {
                    $crate::SchemaBuilder::<$name>::new()
                        $(
                            .field(
                                ::std::stringify!($field),
                                |r| &r.$field,
                                |r| &mut r.$field,
                                $codec,
                            )
                        )*
                        .end()
                        $($(
                            .runtime(::std::stringify!($rfield))
                        )*)?
                        .build()
                })
            }
        }

        $crate::sexp_record!(@hooks $name $(, $hooks)?);
    };
}
