//! Procedural macros shared by the tilecut crates.
//!
//! [`macro@context`] wraps the body of a function returning `anyhow::Result` and attaches
//! a formatted message to any error it returns:
//!
//! ```ignore
//! #[context("opening MBTiles at '{}'", path.display())]
//! fn open_path(path: &Path) -> Result<MBTilesReader> { ... }
//! ```

mod args;

use crate::args::ContextArgs;
use proc_macro::TokenStream;
use proc_macro2::{Ident, Span};
use quote::{ToTokens, quote};
use syn::parse_macro_input;

#[proc_macro_attribute]
pub fn context(args: TokenStream, input: TokenStream) -> TokenStream {
	let ContextArgs { message, rest } = parse_macro_input!(args as ContextArgs);
	let mut function = parse_macro_input!(input as syn::ItemFn);

	if let Some(asyncness) = function.sig.asyncness {
		return syn::Error::new_spanned(asyncness, "#[context] only supports synchronous functions")
			.to_compile_error()
			.into();
	}

	let return_type = match &function.sig.output {
		syn::ReturnType::Default => {
			return syn::Error::new_spanned(&function.sig, "function should return Result")
				.to_compile_error()
				.into();
		}
		syn::ReturnType::Type(_, return_type) => return_type.clone(),
	};

	let body = &function.block;
	let err = Ident::new("err", Span::mixed_site());
	let force_fn_once = Ident::new("force_fn_once", Span::mixed_site());

	// Moving a non-`Copy` value into the closure makes borrowck treat it as `FnOnce`.
	let new_body = quote! {
		let #force_fn_once = ::core::iter::empty::<()>();
		(|| -> #return_type {
			::core::mem::drop(#force_fn_once);
			#body
		})().map_err(|#err| #err.context(format!(#message #rest)))
	};
	function.block.stmts = vec![syn::Stmt::Expr(syn::Expr::Verbatim(new_body), None)];

	function.into_token_stream().into()
}
