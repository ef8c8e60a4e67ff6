use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, LitStr};

/// Implements `keybot::api::Request` for a request struct. The Bot API method
/// is named with `#[bot(method = "sendMessage")]`.
#[proc_macro_derive(BotRequest, attributes(bot))]
pub fn keybot_derive_request(input: TokenStream) -> TokenStream {
    let DeriveInput { ident, attrs, .. } = parse_macro_input!(input);

    let mut method: Option<LitStr> = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("bot")) {
        let parsed = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("method") {
                method = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported bot attribute, expected `method`"))
            }
        });

        if let Err(err) = parsed {
            return err.to_compile_error().into();
        }
    }

    let Some(method) = method else {
        return syn::Error::new(
            ident.span(),
            "BotRequest needs a method name: #[bot(method = \"...\")]",
        )
        .to_compile_error()
        .into();
    };

    let output = quote! {
        impl crate::api::Request for #ident {
            const METHOD: &'static str = #method;
        }
    };
    output.into()
}
