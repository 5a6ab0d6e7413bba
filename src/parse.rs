use crate::pct_enc::{self, table::*, Table};
use core::{fmt, num::NonZeroUsize};

/// Detailed cause of a [`ParseError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// Unexpected character or end of input.
    ///
    /// The error index points to the first byte of the character or the end of input.
    UnexpectedCharOrEnd,
    /// Port number that does not fit in 16 bits.
    ///
    /// The error index points to the first digit of the port.
    InvalidPort,
}

/// An error occurred when parsing a URI reference.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParseError {
    pub(crate) index: usize,
    pub(crate) kind: ParseErrorKind,
}

impl ParseError {
    /// Returns the index at which the error occurred.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the detailed cause of the error.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self.kind {
            ParseErrorKind::UnexpectedCharOrEnd => "unexpected character or end of input",
            ParseErrorKind::InvalidPort => "port number out of range",
        };
        write!(f, "{} at index {}", msg, self.index)
    }
}

#[cfg(feature = "impl-error")]
impl crate::Error for ParseError {}

type Result<T> = core::result::Result<T, ParseError>;

/// Returns immediately with an error.
macro_rules! err {
    ($index:expr, $kind:ident) => {
        return Err(ParseError {
            index: $index,
            kind: ParseErrorKind::$kind,
        })
    };
}

/// Component bounds of a parsed URI reference.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Meta {
    pub scheme_end: Option<NonZeroUsize>,
    pub auth_meta: Option<AuthMeta>,
    pub path_bounds: (usize, usize),
    pub query_end: Option<NonZeroUsize>,
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct AuthMeta {
    /// Index of the `'@'` delimiter, if userinfo is present.
    pub userinfo_end: Option<usize>,
    pub host_bounds: (usize, usize),
    /// Parsed port. `None` when absent or empty.
    pub port: Option<u16>,
}

pub(crate) fn parse(bytes: &[u8]) -> Result<Meta> {
    let mut parser = Parser {
        bytes,
        pos: 0,
        out: Meta::default(),
    };
    parser.parse_from_scheme()?;
    Ok(parser.out)
}

/// URI reference parser.
///
/// # Invariants
///
/// `pos <= bytes.len()` and `pos` is on the boundary of a UTF-8 code point.
///
/// When parsing succeeds, all output indexes are within bounds, correctly
/// ordered, and every component they delimit is validated.
struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
    out: Meta,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PathKind {
    General,
    AbEmpty,
    ContinuedNoScheme,
}

impl Parser<'_> {
    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn has_remaining(&self) -> bool {
        self.pos < self.len()
    }

    fn peek(&self, i: usize) -> Option<u8> {
        self.bytes.get(self.pos + i).copied()
    }

    fn skip(&mut self, n: usize) {
        self.pos += n;
        debug_assert!(self.pos <= self.len());
    }

    /// Reads as many bytes as allowed by the table, returning whether anything was read.
    fn read(&mut self, table: Table) -> Result<bool> {
        let start = self.pos;
        let mut i = self.pos;

        while i < self.len() {
            let x = self.bytes[i];
            if table.allows_pct_encoded() && x == b'%' {
                let [hi, lo, ..] = self.bytes[i + 1..] else {
                    err!(i, UnexpectedCharOrEnd);
                };
                if !pct_enc::is_hexdig(hi) {
                    err!(i + 1, UnexpectedCharOrEnd);
                }
                if !pct_enc::is_hexdig(lo) {
                    err!(i + 2, UnexpectedCharOrEnd);
                }
                i += 3;
            } else if table.allows_ascii(x) {
                i += 1;
            } else {
                break;
            }
        }

        self.pos = i;
        Ok(self.pos > start)
    }

    fn read_str(&mut self, s: &str) -> bool {
        if self.bytes[self.pos..].starts_with(s.as_bytes()) {
            self.skip(s.len());
            true
        } else {
            false
        }
    }

    fn read_ip_literal(&mut self) -> Result<bool> {
        if !self.read_str("[") {
            return Ok(false);
        }
        if !self.read(IP_LITERAL)? || !self.read_str("]") {
            err!(self.pos, UnexpectedCharOrEnd);
        }
        Ok(true)
    }

    /// Reads a host, returning whether it is an IP literal.
    fn read_host(&mut self) -> Result<bool> {
        if self.read_ip_literal()? {
            Ok(true)
        } else {
            self.read(REG_NAME)?;
            Ok(false)
        }
    }

    /// Reads an optional port, returning the bounds of its digits.
    fn read_port(&mut self) -> Result<Option<(usize, usize)>> {
        if !self.read_str(":") {
            return Ok(None);
        }
        let start = self.pos;
        self.read(PORT)?;
        Ok(Some((start, self.pos)))
    }

    fn port_value(&self, bounds: Option<(usize, usize)>) -> Result<Option<u16>> {
        let Some((start, end)) = bounds else {
            return Ok(None);
        };
        let digits = &self.bytes[start..end];
        if digits.is_empty() {
            return Ok(None);
        }

        let mut port: u16 = 0;
        for &x in digits {
            match port
                .checked_mul(10)
                .and_then(|p| p.checked_add(u16::from(x - b'0')))
            {
                Some(p) => port = p,
                None => err!(start, InvalidPort),
            }
        }
        Ok(Some(port))
    }

    fn parse_from_scheme(&mut self) -> Result<()> {
        self.read(SCHEME)?;

        if self.peek(0) == Some(b':') {
            // Scheme starts with a letter.
            if self.pos > 0 && self.bytes[0].is_ascii_alphabetic() {
                self.out.scheme_end = NonZeroUsize::new(self.pos);
            } else {
                err!(0, UnexpectedCharOrEnd);
            }

            self.skip(1);
            return if self.read_str("//") {
                self.parse_from_authority()
            } else {
                self.parse_from_path(PathKind::General)
            };
        } else if self.pos == 0 {
            // Nothing read.
            if self.read_str("//") {
                return self.parse_from_authority();
            }
        }
        // Scheme chars are valid for path.
        self.parse_from_path(PathKind::ContinuedNoScheme)
    }

    fn parse_from_authority(&mut self) -> Result<()> {
        // A reg-name and a port can also be part of userinfo,
        // so read them first and reinterpret on seeing '@'.
        let mut host_start = self.pos;
        let ip_literal = self.read_host()?;
        let mut host_end = self.pos;
        let mut port = self.read_port()?;
        let mut userinfo_end = None;

        if !ip_literal {
            let userinfo_read = self.read(USERINFO)?;

            if self.peek(0) == Some(b'@') {
                userinfo_end = Some(self.pos);
                self.skip(1);

                host_start = self.pos;
                self.read_host()?;
                host_end = self.pos;
                port = self.read_port()?;
            } else if userinfo_read {
                err!(self.pos, UnexpectedCharOrEnd);
            }
        }

        self.out.auth_meta = Some(AuthMeta {
            userinfo_end,
            host_bounds: (host_start, host_end),
            port: self.port_value(port)?,
        });
        self.parse_from_path(PathKind::AbEmpty)
    }

    fn parse_from_path(&mut self, kind: PathKind) -> Result<()> {
        let path_start = match kind {
            PathKind::General | PathKind::AbEmpty => self.pos,
            PathKind::ContinuedNoScheme => {
                self.read(SEGMENT_NZ_NC)?;

                if self.peek(0) == Some(b':') {
                    // In a relative reference, the first path
                    // segment cannot contain a colon character.
                    err!(self.pos, UnexpectedCharOrEnd);
                }
                0
            }
        };

        if self.read(PATH)? && kind == PathKind::AbEmpty && self.bytes[path_start] != b'/' {
            err!(path_start, UnexpectedCharOrEnd);
        }

        self.out.path_bounds = (path_start, self.pos);

        if self.read_str("?") {
            self.read(QUERY)?;
            self.out.query_end = NonZeroUsize::new(self.pos);
        }

        if self.read_str("#") {
            self.read(FRAGMENT)?;
        }

        if self.has_remaining() {
            err!(self.pos, UnexpectedCharOrEnd);
        }
        Ok(())
    }
}
