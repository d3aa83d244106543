use super::coord::InputCoord;

/// A kind of token, per `spec.md` §6's concrete syntax.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum TKind {
    /// `person_1`, `MaxInt32`, `F`, `p` — case of the leading letter
    /// decides constant/variable/function/predicate at the parser level.
    Ident,

    /// `!`
    Excl,
    /// `&`
    Amp,
    /// `|`
    Bar,
    /// `=>`
    Implies,
    /// `<=>`
    Iff,

    /// `=`
    Eq,
    /// `!=`
    NEq,

    /// `*` (universal quantifier prefix)
    Star,
    /// `?` (existential quantifier prefix)
    Quest,

    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `(`
    LPar,
    /// `)`
    RPar,

    /// Any illegal symbol.
    Illegal,
}

/// A token.
#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TKind,
    pub text: String,
    pub from: InputCoord,
    pub to: InputCoord,
}
