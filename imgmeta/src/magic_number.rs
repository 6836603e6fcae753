//! Helps handle files without knowing their file type beforehand.
//!
//! Each provider knows its own magic number (the leading bytes that identify
//! its format). This module checks them in a fixed order, then parses the
//! file with the first provider that accepts it.
//!
//! # Usage
//!
//! ```
//! use imgmeta::magic_number::{AnyProvider, MagicNumber};
//!
//! // a tiny little-endian TIFF with an empty IFD0
//! let file: &[u8] = &[b'I', b'I', 42, 0, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0];
//!
//! // `MagicNumber::new` only looks at the leading bytes...
//! assert_eq!(MagicNumber::new(&file), Some(MagicNumber::Tiff));
//!
//! // ...while `AnyProvider::new` parses the whole file.
//! let parsed: AnyProvider = AnyProvider::new(&file).unwrap();
//! assert_eq!(parsed.magic_number(), MagicNumber::Tiff);
//! ```

use crate::{
    MetadataProvider as _,
    error::Error,
    providers::{
        RawBlobs, bmff::Bmff, crw::Crw, eps::Eps, jp2::Jp2, jpeg::Jpeg, png::Png, psd::Psd,
        raf::Raf, tiff::Tiff, webp::Webp, xmp_sidecar::XmpSidecar,
    },
    write::{MetadataUpdate, WriteOutcome},
};

/// Every provider has to be listed in `providers!()` below.
///
/// The macro implements this; nothing else should.
#[doc(hidden)]
#[diagnostic::on_unimplemented(
    message = "`{Self}` isn't listed in the `providers!()` call in `imgmeta/src/magic_number.rs`."
)]
pub trait _ListedProvider {
    #[doc(hidden)]
    fn _listed(self);
}

/// Builds [`MagicNumber`] and [`AnyProvider`] from the list of providers.
///
/// Order matters: detection tries each provider in turn, and the first whose
/// magic number matches gets the file.
macro_rules! providers {
    ( $( $variant:ident => $provider_ty:ty, )+ ) => {
        /// Which container format a file is in.
        #[repr(u16)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Hash)]
        pub enum MagicNumber {
            $($variant,)+
        }

        /// A parsed file of any supported format.
        #[derive(Clone, Debug)]
        pub enum AnyProvider {
            $($variant($provider_ty),)+
        }

        impl MagicNumber {
            /// Detects a file's format from its leading bytes.
            #[inline(always)]
            pub fn new(input: &impl AsRef<[u8]>) -> Option<Self> {
                get(input)
            }

            /// The format's display name, like `JPEG`.
            pub fn format(&self) -> &'static str {
                match self {
                    $(Self::$variant => <$provider_ty as $crate::MetadataProvider>::FORMAT,)+
                }
            }
        }

        impl AnyProvider {
            /// Detects a file's format, then parses it.
            ///
            /// # Errors
            ///
            /// [`Error::UnsupportedImageType`] when no magic number matches,
            /// or a [`Error::Provider`] when one does but the file is broken.
            #[inline(always)]
            pub fn new(input: &impl AsRef<[u8]>) -> Result<Self, Error> {
                parse(input)
            }

            /// Which format this is.
            pub fn magic_number(&self) -> MagicNumber {
                match self {
                    $(Self::$variant(..) => MagicNumber::$variant,)+
                }
            }

            /// The raw metadata blobs the provider found.
            pub fn blobs(&self) -> &RawBlobs {
                match self {
                    $(Self::$variant(inner) => inner.blobs(),)+
                }
            }

            /// See [`MetadataProvider::write`][`crate::MetadataProvider::write`].
            pub fn write(
                &self,
                input: &[u8],
                update: &MetadataUpdate<'_>,
            ) -> Result<WriteOutcome, Error> {
                match self {
                    $(Self::$variant(inner) => inner.write(input, update),)+
                }
            }

            /// Describes the container's layout, one line per part.
            pub fn structure(&self, input: &[u8], recursive: bool) -> Vec<String> {
                match self {
                    $(Self::$variant(inner) => inner.structure(input, recursive),)+
                }
            }
        }

        $(
            impl From<$provider_ty> for AnyProvider {
                fn from(provider: $provider_ty) -> Self {
                    Self::$variant(provider)
                }
            }

            impl _ListedProvider for $provider_ty {
                fn _listed(self) {}
            }
        )+

        impl From<AnyProvider> for MagicNumber {
            fn from(provider: AnyProvider) -> MagicNumber {
                provider.magic_number()
            }
        }

        pub(super) fn parse(input: &impl AsRef<[u8]>) -> Result<AnyProvider, Error> {
            let bytes: &[u8] = input.as_ref();

            // if a provider claims the file but can't read it, we still try
            // the others. its error is reported if none of them work
            let mut first_error: Option<Error> = None;

            $(
                if <$provider_ty as $crate::MetadataProvider>::magic_number(bytes) {
                    ::log::trace!("trying `{}`", <$provider_ty as $crate::MetadataProvider>::FORMAT);
                    match <$provider_ty as $crate::MetadataProvider>::new(input) {
                        Ok(p) => return Ok(AnyProvider::from(p)),
                        Err(e) => {
                            ::log::warn!(
                                "the file starts like `{}`, but couldn't be read as one. err: {e}",
                                <$provider_ty as $crate::MetadataProvider>::FORMAT,
                            );
                            first_error.get_or_insert(Error::Provider {
                                format: <$provider_ty as $crate::MetadataProvider>::FORMAT,
                                message: e.to_string(),
                            });
                        }
                    }
                }
            )+

            ::log::debug!("no provider could read the file");
            Err(first_error.unwrap_or(Error::UnsupportedImageType))
        }

        pub(super) fn get(input: &impl AsRef<[u8]>) -> Option<MagicNumber> {
            let bytes: &[u8] = input.as_ref();
            $(
                if <$provider_ty as $crate::MetadataProvider>::magic_number(bytes) {
                    return Some(MagicNumber::$variant);
                }
            )+
            None
        }
    };
}

// sidecars are just text that mentions `x:xmpmeta`, so they go last
providers!(
    Jpeg => Jpeg,
    Tiff => Tiff,
    Png => Png,
    Webp => Webp,
    Psd => Psd,
    Raf => Raf,
    Crw => Crw,
    Jp2 => Jp2,
    Bmff => Bmff,
    Eps => Eps,
    XmpSidecar => XmpSidecar,
);
