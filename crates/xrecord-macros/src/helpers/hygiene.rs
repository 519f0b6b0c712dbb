use proc_macro2::TokenStream;
use quote::quote;

/// Wraps the provided [`TokenStream`] with a `const _: () = { ... }` block, returning a new [`TokenStream`].
///
/// This keeps any items that the record derives generate from leaking into the scope in which the macro is invoked.
/// `impl` blocks inside the wrapped code still apply to the outer types, and so the generated [`Record`] impls and
/// constructors remain visible.
///
/// [`Record`]: https://docs.rs/xrecord/latest/xrecord/trait.Record.html
pub fn const_block(code: TokenStream) -> TokenStream {
    quote! {
        #[doc(hidden)]
        #[allow(non_upper_case_globals, unused_attributes, unused_qualifications)]
        const _: () = {
            #code
        };
    }
}
