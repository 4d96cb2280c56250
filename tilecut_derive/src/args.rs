use proc_macro2::TokenStream as TokenStream2;
use syn::{
	LitStr,
	parse::{self, Parse, ParseStream},
};

/// Arguments of `#[context("message {}", arg, ...)]`: a format string followed by
/// its (optional, comma separated) format arguments.
#[derive(Debug)]
pub struct ContextArgs {
	pub message: LitStr,
	pub rest: TokenStream2,
}

impl Parse for ContextArgs {
	fn parse(input: ParseStream<'_>) -> parse::Result<Self> {
		if input.is_empty() {
			return Err(input.error("expected a context message, e.g. #[context(\"reading {}\", name)]"));
		}
		let message: LitStr = input.parse()?;
		let rest: TokenStream2 = input.parse()?;
		Ok(Self { message, rest })
	}
}
