//! The `split_accessors!` declaration macro

/// Install named split accessor methods on a host type.
///
/// The Rust rendition of a class-body declaration: for each listed field
/// the macro emits one method returning the bound read/write accessor and
/// one returning the read-only view, with a declaration-scoped
/// [`SplitConfig`](crate::SplitConfig) held in a `LazyLock` static. The
/// config expression, when given, must be pure; it is evaluated lazily at
/// each method's first use.
///
/// ```
/// use chrono::NaiveDateTime;
/// use timesplit::split_accessors;
///
/// struct Event {
///     starts_at: Option<NaiveDateTime>,
/// }
///
/// split_accessors! {
///     impl Event {
///         starts_at => starts_at_split / starts_at_view;
///     }
/// }
///
/// let mut event = Event { starts_at: None };
/// event.starts_at_split().set_time_str("08:33").unwrap();
/// assert_eq!(event.starts_at_view().time(), Some("08:33:00".to_string()));
/// ```
///
/// A per-declaration config goes after the method names:
///
/// ```
/// # use chrono::NaiveDateTime;
/// # use timesplit::{SplitConfig, split_accessors};
/// # struct Event { starts_at: Option<NaiveDateTime> }
/// split_accessors! {
///     impl Event {
///         starts_at => starts_at_split / starts_at_view:
///             SplitConfig::new().with_date_format("%m/%d/%y");
///     }
/// }
/// ```
#[macro_export]
macro_rules! split_accessors {
    (impl $host:ty { $($field:ident => $split:ident / $view:ident $(: $config:expr)? ;)+ }) => {
        impl $host {
            $(
                pub fn $split(&mut self) -> $crate::Split<'_> {
                    $crate::Split::new(
                        &mut self.$field,
                        $crate::split_accessors!(@config $($config)?),
                    )
                }

                pub fn $view(&self) -> $crate::SplitView<'_> {
                    $crate::SplitView::new(
                        self.$field.as_ref(),
                        $crate::split_accessors!(@config $($config)?),
                    )
                }
            )+
        }
    };
    (@config) => {{
        static CONFIG: std::sync::LazyLock<$crate::SplitConfig> =
            std::sync::LazyLock::new($crate::SplitConfig::new);
        &*CONFIG
    }};
    (@config $config:expr) => {{
        static CONFIG: std::sync::LazyLock<$crate::SplitConfig> =
            std::sync::LazyLock::new(|| $config);
        &*CONFIG
    }};
}
