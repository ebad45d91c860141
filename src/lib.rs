//! SQL editing intelligence for the query console: a lexical scanner for
//! highlighting, schema-driven completions, and a debounced query-suggestion
//! pipeline, wired to a host text-editing surface.
reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(sql);
reexport!(metadata);
reexport!(autocomplete);
reexport!(suggest);
reexport!(editor);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}
