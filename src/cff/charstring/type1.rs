//! Type 1 charstring decoding.
//!
//! Subroutine calls are inlined and the OtherSubrs protocol is reduced to the two flex markers
//! (`1 callothersubr` to begin and `0 callothersubr` to end), so the resulting tokens can be
//! rendered without access to the Subrs INDEX.

use log::warn;

use crate::binary::read::{ReadCtxt, ReadScope};
use crate::cff::{CFFError, Index};
use crate::error::ParseError;

use super::{
    operator, push_number, read_integer, read_key, Token, Type1Op, STACK_LIMIT,
    TWO_BYTE_OPERATOR_MARK,
};

/// Decode a Type 1 charstring into a flat token sequence.
///
/// `subrs` is the local Subrs INDEX from the Private DICT. Type 1 subroutine numbers are not
/// biased.
pub fn decode(char_string: &[u8], subrs: Option<&Index<'_>>) -> Result<Vec<Token<Type1Op>>, CFFError> {
    let decoder = Decoder { subrs };
    let mut seq = Vec::new();
    decoder.parse(char_string, 0, &mut seq)?;
    Ok(seq)
}

struct Decoder<'a, 'data> {
    subrs: Option<&'a Index<'data>>,
}

impl Decoder<'_, '_> {
    fn parse(
        &self,
        char_string: &[u8],
        depth: u8,
        seq: &mut Vec<Token<Type1Op>>,
    ) -> Result<(), CFFError> {
        let mut ctxt = ReadScope::new(char_string).ctxt();
        while ctxt.bytes_available() {
            let b0 = ctxt.read_u8()?;
            match b0 {
                0..=31 => {
                    let key = read_key(b0, &mut ctxt)?;
                    match Type1Op::from_key(key) {
                        Some(Type1Op::CallSubr) => self.call_subr(depth, seq)?,
                        Some(Type1Op::CallOtherSubr) => call_other_subr(&mut ctxt, seq)?,
                        Some(op) => seq.push(Token::Operator(op)),
                        None => warn!("unknown Type 1 charstring operator {}", key),
                    }
                }
                255 => push_number(seq, f64::from(ctxt.read_i32be()?))?,
                _ => push_number(seq, f64::from(read_integer(b0, &mut ctxt)?))?,
            }
        }

        Ok(())
    }

    fn call_subr(&self, depth: u8, seq: &mut Vec<Token<Type1Op>>) -> Result<(), CFFError> {
        let index = match seq.pop() {
            Some(Token::Number(n)) if n.fract() == 0.0 => n,
            other => {
                warn!("callsubr with non-integer operand {:?}", other);
                return Ok(());
            }
        };

        let subr = self
            .subrs
            .filter(|_| index >= 0.0)
            .and_then(|subrs| subrs.read_object(index as usize));
        match subr {
            Some(subr) => {
                if depth >= STACK_LIMIT {
                    return Err(CFFError::NestingLimitReached);
                }
                self.parse(subr, depth + 1, seq)?;
                if seq.last() == Some(&Token::Operator(Type1Op::Return)) {
                    seq.pop();
                }
            }
            None => {
                warn!("invalid Type 1 subroutine index {}", index);
                while seq.last().map_or(false, Token::is_number) {
                    seq.pop();
                }
            }
        }

        Ok(())
    }
}

fn call_other_subr(ctxt: &mut ReadCtxt<'_>, seq: &mut Vec<Token<Type1Op>>) -> Result<(), CFFError> {
    let num = remove_integer(seq)?;
    let num_args = remove_integer(seq)?;

    // OtherSubr results, returned to the charstring by the `pop` operators that follow.
    let mut results = Vec::new();
    match num {
        // End flex
        0 => {
            results.push(remove_integer(seq)?);
            results.push(remove_integer(seq)?);
            seq.pop();
            seq.push(Token::Number(0.0));
            seq.push(Token::Operator(Type1Op::CallOtherSubr));
        }
        // Begin flex
        1 => {
            seq.push(Token::Number(1.0));
            seq.push(Token::Operator(Type1Op::CallOtherSubr));
        }
        // Hint replacement
        3 => results.push(remove_integer(seq)?),
        _ => {
            for _ in 0..num_args {
                results.push(remove_integer(seq)?);
            }
        }
    }

    while ctxt.peek_u8(0).ok() == Some(TWO_BYTE_OPERATOR_MARK)
        && ctxt.peek_u8(1).ok() == Some(operator::POP)
    {
        let result = match results.pop() {
            Some(result) => result,
            None => break,
        };
        ctxt.read_u8()?;
        ctxt.read_u8()?;
        push_number(seq, f64::from(result))?;
    }

    if !results.is_empty() {
        warn!(
            "{} unused results from othersubr {}",
            results.len(),
            num
        );
    }

    Ok(())
}

/// Pop an integer from the end of the sequence, evaluating a trailing `div`.
fn remove_integer(seq: &mut Vec<Token<Type1Op>>) -> Result<i32, CFFError> {
    match seq.pop() {
        Some(Token::Number(n)) => Ok(n as i32),
        Some(Token::Operator(Type1Op::Div)) => {
            let a = remove_integer(seq)?;
            let b = remove_integer(seq)?;
            b.checked_div(a)
                .ok_or(CFFError::ParseError(ParseError::BadValue))
        }
        Some(_) => Err(CFFError::InvalidOperator),
        None => Err(CFFError::InvalidArgumentsStackLength),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::cff_int;
    use crate::tests::writer::{self, Value::*};

    use Token::{Number, Operator};

    fn ops(values: &[writer::Value]) -> Vec<u8> {
        writer::convert(values)
    }

    fn tokens_to_string(tokens: &[Token<Type1Op>]) -> String {
        tokens
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn subrs_index(subrs: &[Vec<u8>]) -> Vec<u8> {
        crate::tests::index(subrs)
    }

    #[test]
    fn test_decode_numbers() {
        let mut data = Vec::new();
        for n in [0, 107, -107, 108, 1131, -108, -1131] {
            data.extend(cff_int(n));
        }
        // Type 1 uses 255 for a 32-bit integer
        data.push(255);
        data.extend_from_slice(&100_000i32.to_be_bytes());
        data.push(14);

        let tokens = decode(&data, None).unwrap();
        assert_eq!(
            tokens_to_string(&tokens),
            "0 107 -107 108 1131 -108 -1131 100000 endchar"
        );
    }

    #[test]
    fn test_decode_operators() {
        let data = ops(&[
            CFFInt(0),
            CFFInt(500),
            Op(13),
            CFFInt(10),
            CFFInt(20),
            Op(21),
            CFFInt(30),
            Op(6),
            Op(9),
            EscOp(0),
            Op(14),
        ]);
        let tokens = decode(&data, None).unwrap();
        assert_eq!(
            tokens_to_string(&tokens),
            "0 500 hsbw 10 20 rmoveto 30 hlineto closepath dotsection endchar"
        );
    }

    #[test]
    fn test_callsubr_is_inlined() {
        let subrs = subrs_index(&[ops(&[CFFInt(30), Op(6), Op(11)]), ops(&[Op(9), Op(11)])]);
        let subrs = ReadScope::new(&subrs).read::<Index<'_>>().unwrap();
        let data = ops(&[CFFInt(0), Op(10), CFFInt(1), Op(10), Op(14)]);
        let tokens = decode(&data, Some(&subrs)).unwrap();
        assert_eq!(tokens_to_string(&tokens), "30 hlineto closepath endchar");
    }

    #[test]
    fn test_callsubr_invalid_index() {
        let subrs = subrs_index(&[ops(&[Op(11)])]);
        let subrs = ReadScope::new(&subrs).read::<Index<'_>>().unwrap();
        let data = ops(&[CFFInt(5), CFFInt(7), Op(10), Op(14)]);
        let tokens = decode(&data, Some(&subrs)).unwrap();
        assert_eq!(tokens, vec![Operator(Type1Op::EndChar)]);

        // Without any subroutines
        let tokens = decode(&data, None).unwrap();
        assert_eq!(tokens, vec![Operator(Type1Op::EndChar)]);
    }

    #[test]
    fn test_callsubr_non_integer_operand() {
        let data = ops(&[Op(9), Op(10), Op(14)]);
        let tokens = decode(&data, None).unwrap();
        assert_eq!(tokens, vec![Operator(Type1Op::EndChar)]);
    }

    #[test]
    fn test_recursive_subr() {
        let subrs = subrs_index(&[ops(&[CFFInt(0), Op(10), Op(11)])]);
        let subrs = ReadScope::new(&subrs).read::<Index<'_>>().unwrap();
        let data = ops(&[CFFInt(0), Op(10), Op(14)]);
        assert_eq!(
            decode(&data, Some(&subrs)),
            Err(CFFError::NestingLimitReached)
        );
    }

    #[test]
    fn test_flex_markers() {
        // 0 1 callothersubr, then 17 0 3 callothersubr pop pop
        let data = ops(&[
            CFFInt(0),
            CFFInt(1),
            EscOp(16),
            CFFInt(50),
            CFFInt(300),
            CFFInt(20),
            CFFInt(3),
            CFFInt(0),
            EscOp(16),
            EscOp(17),
            EscOp(17),
            Op(14),
        ]);
        let tokens = decode(&data, None).unwrap();
        assert_eq!(
            tokens_to_string(&tokens),
            "1 callothersubr 0 callothersubr 300 20 endchar"
        );
    }

    #[test]
    fn test_hint_replacement() {
        let subrs = subrs_index(&[ops(&[Op(11)]), ops(&[CFFInt(10), CFFInt(20), Op(1), Op(11)])]);
        let subrs = ReadScope::new(&subrs).read::<Index<'_>>().unwrap();
        // 1 1 3 callothersubr pop callsubr
        let data = ops(&[
            CFFInt(1),
            CFFInt(1),
            CFFInt(3),
            EscOp(16),
            EscOp(17),
            Op(10),
            Op(14),
        ]);
        let tokens = decode(&data, Some(&subrs)).unwrap();
        assert_eq!(tokens_to_string(&tokens), "10 20 hstem endchar");
    }

    #[test]
    fn test_othersubr_generic_results() {
        let data = ops(&[
            CFFInt(7),
            CFFInt(8),
            CFFInt(2),
            CFFInt(12),
            EscOp(16),
            EscOp(17),
            EscOp(17),
            Op(14),
        ]);
        let tokens = decode(&data, None).unwrap();
        assert_eq!(tokens_to_string(&tokens), "7 8 endchar");

        // Results that are never popped are dropped.
        let data = ops(&[CFFInt(7), CFFInt(1), CFFInt(12), EscOp(16), Op(14)]);
        let tokens = decode(&data, None).unwrap();
        assert_eq!(tokens_to_string(&tokens), "endchar");
    }

    #[test]
    fn test_othersubr_div_argument() {
        // 300 3 div evaluates to 100
        let data = ops(&[
            CFFInt(300),
            CFFInt(3),
            EscOp(12),
            CFFInt(1),
            CFFInt(12),
            EscOp(16),
            EscOp(17),
            Op(14),
        ]);
        let tokens = decode(&data, None).unwrap();
        assert_eq!(tokens, vec![Number(100.0), Operator(Type1Op::EndChar)]);
    }

    #[test]
    fn test_othersubr_missing_arguments() {
        let data = ops(&[CFFInt(3), EscOp(16)]);
        assert_eq!(
            decode(&data, None),
            Err(CFFError::InvalidArgumentsStackLength)
        );

        let data = ops(&[Op(9), CFFInt(0), CFFInt(3), EscOp(16)]);
        assert_eq!(decode(&data, None), Err(CFFError::InvalidOperator));
    }

    #[test]
    fn test_argument_stack_limit() {
        let mut data = Vec::new();
        for _ in 0..49 {
            data.extend(cff_int(1));
        }
        data.push(14);
        assert_eq!(
            decode(&data, None),
            Err(CFFError::ArgumentsStackLimitReached)
        );
    }

    #[test]
    fn test_truncated_charstring() {
        assert_eq!(
            decode(&[247], None),
            Err(CFFError::ParseError(ParseError::BadEof))
        );
        assert_eq!(
            decode(&[12], None),
            Err(CFFError::ParseError(ParseError::BadEof))
        );
    }
}
