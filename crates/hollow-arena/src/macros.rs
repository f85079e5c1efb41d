//! Declaration of concrete stores.

/// Declare a store type with one [`TypeArena`](crate::TypeArena) per kind.
///
/// Each field names an arena and its object kind. The macro generates the
/// struct, `new()`, `with_config()`, `Default`, `Debug`, one
/// [`Holds<Kind>`](crate::Holds) impl per field and the
/// [`ObjectStore`](crate::ObjectStore) impl. Arenas are swept and reported
/// in declaration order. Listing the same kind twice fails to compile.
///
/// ```
/// use hollow_arena::{object_store, ObjectStore};
///
/// object_store! {
///     /// Storage for a tiny scene.
///     pub struct Scene {
///         names: String,
///         weights: f32,
///     }
/// }
///
/// let scene = Scene::new();
/// let name = scene.create(String::from("root")).unwrap();
/// let weight = scene.create(0.5f32).unwrap();
/// assert_eq!(&*name.get().unwrap(), "root");
/// assert_eq!(scene.capacity::<f32>(), 1);
/// drop(weight);
/// assert_eq!(scene.sweep().unwrap().total(), 1);
/// ```
#[macro_export]
macro_rules! object_store {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $kind:ty
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field: $crate::TypeArena<$kind>,
            )+
        }

        impl $name {
            /// Create a store with default configuration.
            #[allow(dead_code)]
            $vis fn new() -> Self {
                Self {
                    $( $field: $crate::TypeArena::new(), )+
                }
            }

            /// Create a store whose arenas all follow `config`.
            ///
            /// # Errors
            ///
            /// Returns `Err` if `config` fails validation.
            #[allow(dead_code)]
            $vis fn with_config(
                config: $crate::StoreConfig,
            ) -> ::core::result::Result<Self, $crate::ConfigError> {
                config.validate()?;
                ::core::result::Result::Ok(Self {
                    $( $field: $crate::TypeArena::with_config(&config), )+
                })
            }
        }

        impl ::core::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_struct(::core::stringify!($name))
                    $( .field(::core::stringify!($field), &self.$field) )+
                    .finish()
            }
        }

        $(
            impl $crate::Holds<$kind> for $name {
                fn arena(&self) -> &$crate::TypeArena<$kind> {
                    &self.$field
                }
            }
        )+

        impl $crate::ObjectStore for $name {
            fn sweep(&self) -> ::core::result::Result<$crate::SweepReport, $crate::StoreError> {
                let mut report = $crate::SweepReport::default();
                $(
                    let reclaimed = self.$field.reclaim_unreferenced()?;
                    report.record(self.$field.kind(), reclaimed);
                )+
                $crate::store::log_sweep(::core::stringify!($name), &report);
                ::core::result::Result::Ok(report)
            }

            fn stats(&self) -> $crate::StoreStats {
                let mut stats = $crate::StoreStats::default();
                $(
                    let arena = self.$field.stats();
                    stats.arenas.insert(arena.kind, arena);
                )+
                stats
            }

            fn has_changed(&self) -> bool {
                false $( || self.$field.has_changed() )+
            }

            fn clear_changed(&self) {
                $( self.$field.clear_changed(); )+
            }
        }
    };
}
