//! CharString operator vocabulary and the pieces shared by both charstring dialects.
//!
//! Refer to [Adobe Type 1 Font Format](https://adobe-type-tools.github.io/font-tech-notes/pdfs/T1_SPEC.pdf)
//! and [Technical Note #5177](https://adobe-type-tools.github.io/font-tech-notes/pdfs/5177.Type2.pdf).

use std::convert::TryFrom;
use std::fmt;

use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use tinyvec::TinyVec;

use crate::binary::read::{ReadCtxt, ReadEof};
use crate::error::ParseError;

use super::CFFError;

pub mod normalize;
pub mod type1;
pub mod type2;

// Limits according to the Adobe Technical Note #5177 Appendix B.
pub(crate) const STACK_LIMIT: u8 = 10;
pub(crate) const MAX_ARGUMENTS_STACK_LEN: usize = 48;

pub(crate) const TWO_BYTE_OPERATOR_MARK: u8 = 12;

/// The CharstringType from the Top DICT.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CharstringType {
    Type1,
    Type2,
}

/// The key of a charstring operator: a single byte in `0..=31`, or `12` followed by a second
/// byte.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CommandKey {
    Single(u8),
    Escape(u8),
}

/// One element of a decoded charstring.
///
/// Subroutine calls have already been inlined when a sequence of tokens is produced by one of the
/// decoders.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<O> {
    Number(f64),
    Operator(O),
    /// The mask bytes following a Type 2 `hintmask` or `cntrmask` operator.
    Mask(TinyVec<[u8; 8]>),
}

macro_rules! charstring_operators {
    (
        $(#[$meta:meta])*
        pub enum $name:ident : $lookup:ident {
            $($variant:ident = $key:expr, $text:literal;)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),*
        }

        lazy_static! {
            static ref $lookup: FxHashMap<CommandKey, $name> =
                $name::ALL.iter().map(|op| (op.key(), *op)).collect();
        }

        impl $name {
            /// Every operator of this dialect.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn key(self) -> CommandKey {
                match self {
                    $($name::$variant => $key),*
                }
            }

            /// The name of the operator as it appears in the format documentation.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text),*
                }
            }

            pub fn from_key(key: CommandKey) -> Option<$name> {
                $lookup.get(&key).copied()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

use CommandKey::{Escape, Single};

charstring_operators! {
    /// Type 1 charstring operators.
    pub enum Type1Op: TYPE1_OPERATORS {
        HStem = Single(operator::HORIZONTAL_STEM), "hstem";
        VStem = Single(operator::VERTICAL_STEM), "vstem";
        VMoveTo = Single(operator::VERTICAL_MOVE_TO), "vmoveto";
        RLineTo = Single(operator::LINE_TO), "rlineto";
        HLineTo = Single(operator::HORIZONTAL_LINE_TO), "hlineto";
        VLineTo = Single(operator::VERTICAL_LINE_TO), "vlineto";
        RRCurveTo = Single(operator::CURVE_TO), "rrcurveto";
        ClosePath = Single(operator::CLOSE_PATH), "closepath";
        CallSubr = Single(operator::CALL_LOCAL_SUBROUTINE), "callsubr";
        Return = Single(operator::RETURN), "return";
        Hsbw = Single(operator::HSBW), "hsbw";
        EndChar = Single(operator::ENDCHAR), "endchar";
        RMoveTo = Single(operator::MOVE_TO), "rmoveto";
        HMoveTo = Single(operator::HORIZONTAL_MOVE_TO), "hmoveto";
        VHCurveTo = Single(operator::VH_CURVE_TO), "vhcurveto";
        HVCurveTo = Single(operator::HV_CURVE_TO), "hvcurveto";
        DotSection = Escape(operator::DOT_SECTION), "dotsection";
        VStem3 = Escape(operator::VSTEM3), "vstem3";
        HStem3 = Escape(operator::HSTEM3), "hstem3";
        Seac = Escape(operator::SEAC), "seac";
        Sbw = Escape(operator::SBW), "sbw";
        Div = Escape(operator::DIV), "div";
        CallOtherSubr = Escape(operator::CALL_OTHER_SUBR), "callothersubr";
        Pop = Escape(operator::POP), "pop";
        SetCurrentPoint = Escape(operator::SET_CURRENT_POINT), "setcurrentpoint";
    }
}

charstring_operators! {
    /// Type 2 charstring operators.
    pub enum Type2Op: TYPE2_OPERATORS {
        HStem = Single(operator::HORIZONTAL_STEM), "hstem";
        VStem = Single(operator::VERTICAL_STEM), "vstem";
        VMoveTo = Single(operator::VERTICAL_MOVE_TO), "vmoveto";
        RLineTo = Single(operator::LINE_TO), "rlineto";
        HLineTo = Single(operator::HORIZONTAL_LINE_TO), "hlineto";
        VLineTo = Single(operator::VERTICAL_LINE_TO), "vlineto";
        RRCurveTo = Single(operator::CURVE_TO), "rrcurveto";
        CallSubr = Single(operator::CALL_LOCAL_SUBROUTINE), "callsubr";
        Return = Single(operator::RETURN), "return";
        EndChar = Single(operator::ENDCHAR), "endchar";
        HStemHm = Single(operator::HSTEM_HINT_MASK), "hstemhm";
        HintMask = Single(operator::HINT_MASK), "hintmask";
        CntrMask = Single(operator::COUNTER_MASK), "cntrmask";
        RMoveTo = Single(operator::MOVE_TO), "rmoveto";
        HMoveTo = Single(operator::HORIZONTAL_MOVE_TO), "hmoveto";
        VStemHm = Single(operator::VSTEM_HINT_MASK), "vstemhm";
        RCurveLine = Single(operator::CURVE_LINE), "rcurveline";
        RLineCurve = Single(operator::LINE_CURVE), "rlinecurve";
        VVCurveTo = Single(operator::VV_CURVE_TO), "vvcurveto";
        HHCurveTo = Single(operator::HH_CURVE_TO), "hhcurveto";
        CallGSubr = Single(operator::CALL_GLOBAL_SUBROUTINE), "callgsubr";
        VHCurveTo = Single(operator::VH_CURVE_TO), "vhcurveto";
        HVCurveTo = Single(operator::HV_CURVE_TO), "hvcurveto";
        DotSection = Escape(operator::DOT_SECTION), "dotsection";
        And = Escape(operator::AND), "and";
        Or = Escape(operator::OR), "or";
        Not = Escape(operator::NOT), "not";
        Abs = Escape(operator::ABS), "abs";
        Add = Escape(operator::ADD), "add";
        Sub = Escape(operator::SUB), "sub";
        Div = Escape(operator::DIV), "div";
        Neg = Escape(operator::NEG), "neg";
        Eq = Escape(operator::EQ), "eq";
        Drop = Escape(operator::DROP), "drop";
        Put = Escape(operator::PUT), "put";
        Get = Escape(operator::GET), "get";
        IfElse = Escape(operator::IF_ELSE), "ifelse";
        Random = Escape(operator::RANDOM), "random";
        Mul = Escape(operator::MUL), "mul";
        Sqrt = Escape(operator::SQRT), "sqrt";
        Dup = Escape(operator::DUP), "dup";
        Exch = Escape(operator::EXCH), "exch";
        Index = Escape(operator::INDEX), "index";
        Roll = Escape(operator::ROLL), "roll";
        HFlex = Escape(operator::HFLEX), "hflex";
        Flex = Escape(operator::FLEX), "flex";
        HFlex1 = Escape(operator::HFLEX1), "hflex1";
        Flex1 = Escape(operator::FLEX1), "flex1";
    }
}

impl TryFrom<i32> for CharstringType {
    type Error = ParseError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(CharstringType::Type1),
            2 => Ok(CharstringType::Type2),
            _ => Err(ParseError::NotImplemented),
        }
    }
}

impl fmt::Display for CommandKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Single(b0) => write!(f, "{}", b0),
            Escape(b1) => write!(f, "{} {}", TWO_BYTE_OPERATOR_MARK, b1),
        }
    }
}

impl<O> Token<O> {
    pub fn number(&self) -> Option<f64> {
        match self {
            Token::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Token::Number(_))
    }
}

impl<O: fmt::Display> fmt::Display for Token<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Operator(op) => op.fmt(f),
            Token::Mask(mask) => {
                f.write_str("<")?;
                for b in mask.iter() {
                    write!(f, "{:02x}", b)?;
                }
                f.write_str(">")
            }
        }
    }
}

/// Read the key of the operator starting with `b0`.
pub(crate) fn read_key(b0: u8, ctxt: &mut ReadCtxt<'_>) -> Result<CommandKey, ParseError> {
    if b0 == TWO_BYTE_OPERATOR_MARK {
        Ok(Escape(ctxt.read_u8()?))
    } else {
        Ok(Single(b0))
    }
}

/// Read an integer operand that starts with `b0` in `32..=254`.
///
/// These forms are shared by both dialects. The remaining operand forms (28 and 255) differ
/// between them and are handled by each decoder.
pub(crate) fn read_integer(b0: u8, ctxt: &mut ReadCtxt<'_>) -> Result<i32, ParseError> {
    match b0 {
        32..=246 => Ok(i32::from(b0) - 139),
        247..=250 => {
            let b1 = i32::from(ctxt.read_u8()?);
            Ok((i32::from(b0) - 247) * 256 + b1 + 108)
        }
        251..=254 => {
            let b1 = i32::from(ctxt.read_u8()?);
            Ok(-(i32::from(b0) - 251) * 256 - b1 - 108)
        }
        _ => Err(ParseError::BadValue),
    }
}

/// Push a number, enforcing the argument stack limit.
pub(crate) fn push_number<O>(seq: &mut Vec<Token<O>>, n: f64) -> Result<(), CFFError> {
    if trailing_numbers(seq) >= MAX_ARGUMENTS_STACK_LEN {
        return Err(CFFError::ArgumentsStackLimitReached);
    }
    seq.push(Token::Number(n));
    Ok(())
}

/// The number of `Number` tokens at the end of `seq`.
pub(crate) fn trailing_numbers<O>(seq: &[Token<O>]) -> usize {
    seq.iter().rev().take_while(|token| token.is_number()).count()
}

// Adobe Technical Note #5176, Chapter 16 "Local / Global Subrs INDEXes"
pub(crate) fn calc_subroutine_bias(len: usize) -> u16 {
    if len < 1240 {
        107
    } else if len < 33900 {
        1131
    } else {
        32768
    }
}

pub(crate) fn conv_subroutine_index(index: i32, bias: u16) -> Option<usize> {
    let bias = i32::from(bias);

    let index = index.checked_add(bias)?;
    usize::try_from(index).ok()
}

impl From<ParseError> for CFFError {
    fn from(error: ParseError) -> CFFError {
        CFFError::ParseError(error)
    }
}

impl From<ReadEof> for CFFError {
    fn from(error: ReadEof) -> CFFError {
        CFFError::ParseError(ParseError::from(error))
    }
}

impl fmt::Display for CFFError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CFFError::ParseError(parse_error) => {
                write!(f, "parse error: ")?;
                parse_error.fmt(f)
            }
            CFFError::InvalidOperator => write!(f, "an invalid operator occurred"),
            CFFError::NestingLimitReached => write!(f, "subroutines nesting limit reached"),
            CFFError::ArgumentsStackLimitReached => write!(f, "arguments stack limit reached"),
            CFFError::InvalidArgumentsStackLength => {
                write!(f, "an invalid amount of items are in an arguments stack")
            }
            CFFError::InvalidSubroutineIndex => write!(f, "an invalid subroutine index"),
            CFFError::InvalidSeacCode => write!(f, "invalid seac code"),
        }
    }
}

impl std::error::Error for CFFError {}

/// Operator codes from the Type 1 Font Format and Technical Note #5177.
pub(crate) mod operator {
    pub const HORIZONTAL_STEM: u8 = 1;
    pub const VERTICAL_STEM: u8 = 3;
    pub const VERTICAL_MOVE_TO: u8 = 4;
    pub const LINE_TO: u8 = 5;
    pub const HORIZONTAL_LINE_TO: u8 = 6;
    pub const VERTICAL_LINE_TO: u8 = 7;
    pub const CURVE_TO: u8 = 8;
    pub const CLOSE_PATH: u8 = 9; // Type 1
    pub const CALL_LOCAL_SUBROUTINE: u8 = 10;
    pub const RETURN: u8 = 11;
    pub const HSBW: u8 = 13; // Type 1
    pub const ENDCHAR: u8 = 14;
    pub const HSTEM_HINT_MASK: u8 = 18;
    pub const HINT_MASK: u8 = 19;
    pub const COUNTER_MASK: u8 = 20;
    pub const MOVE_TO: u8 = 21;
    pub const HORIZONTAL_MOVE_TO: u8 = 22;
    pub const VSTEM_HINT_MASK: u8 = 23;
    pub const CURVE_LINE: u8 = 24;
    pub const LINE_CURVE: u8 = 25;
    pub const VV_CURVE_TO: u8 = 26;
    pub const HH_CURVE_TO: u8 = 27;
    pub const SHORT_INT: u8 = 28;
    pub const CALL_GLOBAL_SUBROUTINE: u8 = 29;
    pub const VH_CURVE_TO: u8 = 30;
    pub const HV_CURVE_TO: u8 = 31;
    pub const FIXED_16_16: u8 = 255;

    // Escaped operators, `12 x`.
    pub const DOT_SECTION: u8 = 0;
    pub const VSTEM3: u8 = 1; // Type 1
    pub const HSTEM3: u8 = 2; // Type 1
    pub const AND: u8 = 3;
    pub const OR: u8 = 4;
    pub const NOT: u8 = 5;
    pub const SEAC: u8 = 6; // Type 1
    pub const SBW: u8 = 7; // Type 1
    pub const ABS: u8 = 9;
    pub const ADD: u8 = 10;
    pub const SUB: u8 = 11;
    pub const DIV: u8 = 12;
    pub const NEG: u8 = 14;
    pub const EQ: u8 = 15;
    pub const CALL_OTHER_SUBR: u8 = 16; // Type 1
    pub const POP: u8 = 17; // Type 1
    pub const DROP: u8 = 18;
    pub const PUT: u8 = 20;
    pub const GET: u8 = 21;
    pub const IF_ELSE: u8 = 22;
    pub const RANDOM: u8 = 23;
    pub const MUL: u8 = 24;
    pub const SQRT: u8 = 26;
    pub const DUP: u8 = 27;
    pub const EXCH: u8 = 28;
    pub const INDEX: u8 = 29;
    pub const ROLL: u8 = 30;
    pub const SET_CURRENT_POINT: u8 = 33; // Type 1
    pub const HFLEX: u8 = 34;
    pub const FLEX: u8 = 35;
    pub const HFLEX1: u8 = 36;
    pub const FLEX1: u8 = 37;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::read::ReadScope;

    #[test]
    fn test_vocabulary_keys_are_unique() {
        for ops in [
            Type1Op::ALL.iter().map(|op| op.key()).collect::<Vec<_>>(),
            Type2Op::ALL.iter().map(|op| op.key()).collect::<Vec<_>>(),
        ] {
            let mut keys = ops.clone();
            keys.sort_by_key(|key| match key {
                Single(b) => (0, *b),
                Escape(b) => (1, *b),
            });
            keys.dedup();
            assert_eq!(keys.len(), ops.len());
        }
    }

    #[test]
    fn test_from_key() {
        assert_eq!(Type1Op::from_key(Single(9)), Some(Type1Op::ClosePath));
        assert_eq!(Type2Op::from_key(Single(9)), None);
        assert_eq!(Type1Op::from_key(Escape(17)), Some(Type1Op::Pop));
        assert_eq!(Type2Op::from_key(Escape(35)), Some(Type2Op::Flex));
        assert_eq!(Type2Op::from_key(Single(19)), Some(Type2Op::HintMask));
        for op in Type2Op::ALL {
            assert_eq!(Type2Op::from_key(op.key()), Some(*op));
        }
    }

    #[test]
    fn test_operator_names() {
        assert_eq!(Type1Op::CallOtherSubr.to_string(), "callothersubr");
        assert_eq!(Type2Op::HFlex1.name(), "hflex1");
        assert_eq!(Escape(12).to_string(), "12 12");
        assert_eq!(Single(21).to_string(), "21");
    }

    #[test]
    fn test_charstring_type() {
        assert_eq!(CharstringType::try_from(1), Ok(CharstringType::Type1));
        assert_eq!(CharstringType::try_from(2), Ok(CharstringType::Type2));
        assert_eq!(
            CharstringType::try_from(3),
            Err(ParseError::NotImplemented)
        );
    }

    #[test]
    fn test_read_integer() {
        let cases: &[(&[u8], i32)] = &[
            (&[32], -107),
            (&[139], 0),
            (&[246], 107),
            (&[247, 0], 108),
            (&[250, 255], 1131),
            (&[251, 0], -108),
            (&[254, 255], -1131),
        ];
        for (bytes, expected) in cases {
            let mut ctxt = ReadScope::new(bytes).ctxt();
            let b0 = ctxt.read_u8().unwrap();
            assert_eq!(read_integer(b0, &mut ctxt), Ok(*expected));
        }

        let mut ctxt = ReadScope::new(&[247]).ctxt();
        let b0 = ctxt.read_u8().unwrap();
        assert_eq!(read_integer(b0, &mut ctxt), Err(ParseError::BadEof));
    }

    #[test]
    fn test_subroutine_bias() {
        assert_eq!(calc_subroutine_bias(0), 107);
        assert_eq!(calc_subroutine_bias(1239), 107);
        assert_eq!(calc_subroutine_bias(1240), 1131);
        assert_eq!(calc_subroutine_bias(33899), 1131);
        assert_eq!(calc_subroutine_bias(33900), 32768);

        assert_eq!(conv_subroutine_index(-107, 107), Some(0));
        assert_eq!(conv_subroutine_index(-108, 107), None);
        assert_eq!(conv_subroutine_index(i32::MAX, 107), None);
    }

    #[test]
    fn test_argument_stack_limit() {
        let mut seq: Vec<Token<Type2Op>> = Vec::new();
        for i in 0..MAX_ARGUMENTS_STACK_LEN {
            push_number(&mut seq, i as f64).unwrap();
        }
        assert_eq!(
            push_number(&mut seq, 0.0),
            Err(CFFError::ArgumentsStackLimitReached)
        );

        seq.push(Token::Operator(Type2Op::RLineTo));
        assert_eq!(push_number(&mut seq, 0.0), Ok(()));
        assert_eq!(trailing_numbers(&seq), 1);
    }
}
