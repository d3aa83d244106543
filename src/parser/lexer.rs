//! Lexical analysis, using a shift/skip/push_shift scanning idiom over
//! this grammar's token set — `=>`/`<=>` instead of `->`/`<->`, `*`/`?`
//! quantifier sigils instead of `all`/`exists` keywords, `=`/`!=` for
//! (in)equality, and no arithmetic operators (terms here have no infix
//! arithmetic, only `F(a, b, ...)` application).

use super::coord::InputCoord;
use super::token::{TKind, Token};

pub struct Lexer<I>
where
    I: Iterator<Item = char>,
{
    pos: InputCoord,
    buf: String,
    la: Option<char>,
    lb: Option<char>,
    itr: I,
}

impl<I> Lexer<I>
where
    I: Iterator<Item = char>,
{
    pub fn new(mut itr: I) -> Self {
        Self {
            pos: InputCoord::new(),
            buf: String::new(),
            la: itr.next(),
            lb: None,
            itr,
        }
    }

    pub fn pos(&self) -> InputCoord {
        self.pos
    }

    fn shift(&mut self) {
        if self.la.is_none() {
            return;
        }

        self.lb = self.la;
        self.la = self.itr.next();

        match (self.lb, self.la) {
            (Some('\r'), Some('\n')) => self.pos.advance(),
            (Some('\r'), _) => self.pos.newline(),
            (Some('\n'), _) => self.pos.newline(),
            _ => self.pos.advance(),
        }
    }

    fn push_shift(&mut self) {
        match self.la {
            Some(c) => self.buf.push(c),
            None => panic!("can't push EOF"),
        }
        self.shift();
    }

    fn skip(&mut self) {
        while let Some(c @ (' ' | '\n' | '\r' | '\t' | '#')) = self.la {
            if c == '#' {
                loop {
                    self.shift();
                    if let Some('\n' | '\r') | None = self.la {
                        break;
                    }
                }
            }
            self.shift();
        }
    }

    fn ident(&mut self) -> (String, TKind) {
        while let Some('a'..='z' | 'A'..='Z' | '0'..='9' | '_') = self.la {
            self.push_shift();
        }
        (self.buf.clone(), TKind::Ident)
    }

    fn eq(&mut self) -> (String, TKind) {
        self.push_shift();
        match self.la {
            Some('>') => {
                self.push_shift();
                (self.buf.clone(), TKind::Implies)
            }
            _ => (self.buf.clone(), TKind::Eq),
        }
    }

    fn excl(&mut self) -> (String, TKind) {
        self.push_shift();
        match self.la {
            Some('=') => {
                self.push_shift();
                (self.buf.clone(), TKind::NEq)
            }
            _ => (self.buf.clone(), TKind::Excl),
        }
    }

    fn lt(&mut self) -> (String, TKind) {
        // Only legal continuation is `<=>`; a bare `<` is illegal.
        self.push_shift();
        match self.la {
            Some('=') => {
                self.push_shift();
                match self.la {
                    Some('>') => {
                        self.push_shift();
                        (self.buf.clone(), TKind::Iff)
                    }
                    _ => (self.buf.clone(), TKind::Illegal),
                }
            }
            _ => (self.buf.clone(), TKind::Illegal),
        }
    }

    fn sym(&mut self, kind: TKind) -> (String, TKind) {
        self.push_shift();
        (self.buf.clone(), kind)
    }

    /// Reads the next token, or `None` at end of input. Unrecognized
    /// characters produce a token of kind [`TKind::Illegal`] rather than
    /// failing outright — the parser turns that into a syntax error with
    /// position information.
    pub fn token(&mut self) -> Option<Token> {
        self.skip();
        self.buf.clear();

        let from = self.pos;

        let (text, kind) = match self.la {
            Some('0'..='9' | 'a'..='z' | 'A'..='Z' | '_') => self.ident(),

            Some('=') => self.eq(),
            Some('!') => self.excl(),
            Some('<') => self.lt(),

            Some('&') => self.sym(TKind::Amp),
            Some('|') => self.sym(TKind::Bar),
            Some('*') => self.sym(TKind::Star),
            Some('?') => self.sym(TKind::Quest),
            Some(':') => self.sym(TKind::Colon),
            Some(',') => self.sym(TKind::Comma),
            Some('(') => self.sym(TKind::LPar),
            Some(')') => self.sym(TKind::RPar),

            Some(_) => self.sym(TKind::Illegal),

            None => return None,
        };

        let to = self.pos;

        Some(Token { kind, text, from, to })
    }
}
