//! Per-severity convenience entry points.
//!
//! Eliminates boilerplate for the eight level shortcuts (plus the legacy
//! `warn` alias), each of which comes in a bare form and a `_with` form
//! taking a context.
//!
//! # Usage
//! ```ignore
//! impl LogFacade {
//!     impl_severity_methods!(methods;
//!         "System is unusable." emergency, emergency_with => Emergency;
//!     );
//! }
//!
//! impl_severity_methods!(functions;
//!     "System is unusable." emergency, emergency_with => Emergency;
//! );
//! ```

macro_rules! impl_severity_methods {
    (methods; $($doc:literal $name:ident, $name_with:ident => $severity:ident;)*) => {
        $(
            #[doc = $doc]
            pub fn $name(
                &self,
                message: impl Into<$crate::message::LogMessage>,
            ) -> consulate_common::Result<()> {
                self.log_at(
                    $crate::severity::Severity::$severity,
                    message,
                    &$crate::message::Context::new(),
                )
            }

            #[doc = $doc]
            pub fn $name_with(
                &self,
                message: impl Into<$crate::message::LogMessage>,
                context: &$crate::message::Context,
            ) -> consulate_common::Result<()> {
                self.log_at($crate::severity::Severity::$severity, message, context)
            }
        )*
    };
    (functions; $($doc:literal $name:ident, $name_with:ident => $severity:ident;)*) => {
        $(
            #[doc = $doc]
            pub fn $name(
                message: impl Into<$crate::message::LogMessage>,
            ) -> consulate_common::Result<()> {
                facade().read_recursive().$name(message)
            }

            #[doc = $doc]
            pub fn $name_with(
                message: impl Into<$crate::message::LogMessage>,
                context: &$crate::message::Context,
            ) -> consulate_common::Result<()> {
                facade().read_recursive().$name_with(message, context)
            }
        )*
    };
}

pub(crate) use impl_severity_methods;
