use syn::{Expr, parse::Parse, punctuated::Punctuated, Token, parse_macro_input, spanned::Spanned};
use quote::{quote, quote_spanned, format_ident};

struct Args {
    operands: Vec<Expr>,
}

impl Parse for Args {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let exprs = Punctuated::<Expr, Token![,]>::parse_terminated(input)?;
        Ok(Args {
            operands: exprs.into_iter().collect(),
        })
    }
}

/// Expands to `GrammarElement::<constructor>(first, [rest...])`. Operands can be
/// anything that converts into a `GrammarElement`, string literals included.
fn expand(args: Args, name: &str, constructor: &str) -> proc_macro2::TokenStream {
    let mut operands = args.operands.into_iter();
    let first = match operands.next() {
        Some(first) => first,
        None => {
            let message = format!("{}! needs at least one operand", name);
            return syn::Error::new(proc_macro2::Span::call_site(), message).to_compile_error();
        }
    };

    let rest = operands.map(|operand| {
        quote_spanned! {operand.span()=>
            ::tinyebnf::GrammarElement::from(#operand)
        }
    });

    let constructor = format_ident!("{}", constructor);
    quote! {
        ::tinyebnf::GrammarElement::#constructor(#first, [#(#rest),*])
    }
}

/// Builds a flat sequence: `seq!("let", name, "=", value)`.
#[proc_macro]
pub fn seq(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let args = parse_macro_input!(input as Args);
    proc_macro::TokenStream::from(expand(args, "seq", "sequence_from"))
}

/// Builds a flat choice: `choice!("true", "false", number)`.
#[proc_macro]
pub fn choice(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let args = parse_macro_input!(input as Args);
    proc_macro::TokenStream::from(expand(args, "choice", "choice_from"))
}
