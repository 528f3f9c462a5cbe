//! Helper macros used throughout the crate.

/// Generates a [`From`] implementation that converts a value through an intermediate type.
///
/// Useful when an error type is wrapped in another error type that is itself wrapped in our
/// [`Error`](crate::Error) type: `?` can then be used directly on the innermost error.
///
/// # Examples
///
/// ```ignore
/// use pokemon_api::forward_from;
///
/// // Generates `impl From<ValidationErrors> for Error`, going through `InputError`.
/// forward_from!(validator::ValidationErrors => InputError => Error);
/// ```
#[macro_export]
macro_rules! forward_from {
    ( $source_ty:ty => $intermediate_ty:ty => $target_ty:ty ) => {
        impl ::std::convert::From<$source_ty> for $target_ty {
            #[doc = concat!(
                "Converts a [`", stringify!($source_ty), "`] into [`", stringify!($target_ty),
                "`] by going through [`", stringify!($intermediate_ty), "`].",
            )]
            fn from(value: $source_ty) -> Self {
                <$intermediate_ty as ::std::convert::From<$source_ty>>::from(value).into()
            }
        }
    };
}
