//! Procedural macros used by EOSIO codec tests.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, Ident, ItemFn, LitStr};

const LEVELS: [&str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];

/// Run a test with a `tracing` subscriber installed for its duration.
///
/// The subscriber writes through the test harness (so output is captured unless
/// `--nocapture` is passed) and defaults to the `DEBUG` level. Crates using this attribute
/// must depend on `tracing` and `tracing-subscriber`.
///
/// # Example
/// ```rust,ignore
/// use eosio_macros::test_traced;
///
/// #[test_traced("INFO")]
/// fn test_info_level() {
///     tracing::info!("shown");
///     tracing::debug!("hidden");
/// }
/// ```
#[proc_macro_attribute]
pub fn test_traced(attr: TokenStream, item: TokenStream) -> TokenStream {
    let level = if attr.is_empty() {
        String::from("DEBUG")
    } else {
        parse_macro_input!(attr as LitStr).value().to_uppercase()
    };
    let input = parse_macro_input!(item as ItemFn);

    if !LEVELS.contains(&level.as_str()) {
        return syn::Error::new(Span::call_site(), format!("invalid level: {level}"))
            .to_compile_error()
            .into();
    }
    let level = Ident::new(&level, Span::call_site());

    let attrs = &input.attrs;
    let vis = &input.vis;
    let name = &input.sig.ident;
    let block = &input.block;

    let expanded = quote! {
        #[test]
        #(#attrs)*
        #vis fn #name() {
            let subscriber = ::tracing_subscriber::fmt()
                .with_test_writer()
                .with_max_level(::tracing::Level::#level)
                .with_line_number(true)
                .finish();
            let dispatcher = ::tracing::Dispatch::new(subscriber);
            ::tracing::dispatcher::with_default(&dispatcher, || #block);
        }
    };
    TokenStream::from(expanded)
}
