use crate::{PointerBuf, Token};
use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};
use quickcheck::{Arbitrary, Gen};

/// Strings which need escaping, or look like indices, are overrepresented so
/// the interesting cases come up often.
impl Arbitrary for Token<'static> {
    fn arbitrary(g: &mut Gen) -> Self {
        let raw = match u8::arbitrary(g) % 4 {
            0 => usize::arbitrary(g).to_string(),
            1 => String::from(*g.choose(&["-", "~", "/", "~0", "~1", "", "0"]).unwrap_or(&"")),
            _ => String::arbitrary(g),
        };
        Self::new(raw)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        Box::new(self.decoded().into_owned().shrink().map(Self::new))
    }
}

impl Arbitrary for PointerBuf {
    fn arbitrary(g: &mut Gen) -> Self {
        let count = usize::arbitrary(g) % g.size().max(1);
        Self::from_tokens((0..count).map(|_| Token::arbitrary(g)).collect::<Vec<_>>())
    }

    /// Shrinks by dropping trailing tokens.
    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let mut ptr = self.clone();
        Box::new(core::iter::from_fn(move || {
            ptr.pop_back()?;
            Some(ptr.clone())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[quickcheck]
    fn generated_pointers_parse(ptr: PointerBuf) -> bool {
        PointerBuf::parse(ptr.to_string()).as_ref() == Ok(&ptr)
    }

    #[quickcheck]
    fn generated_tokens_decode(token: Token<'static>) -> bool {
        Token::from_encoded(token.encoded()).is_ok()
    }
}
