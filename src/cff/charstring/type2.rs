//! Type 2 charstring decoding.
//!
//! Local and global subroutine calls are inlined, and the mask bytes that follow `hintmask` and
//! `cntrmask` are read into [Token::Mask]. Decoding stops at the first `endchar`, including one
//! reached inside a subroutine.

use log::warn;
use tinyvec::TinyVec;

use crate::binary::read::ReadScope;
use crate::cff::{CFFError, Index};

use super::{
    calc_subroutine_bias, conv_subroutine_index, operator, push_number, read_integer, read_key,
    trailing_numbers, Token, Type2Op, STACK_LIMIT,
};

/// Decode a Type 2 charstring into a flat token sequence.
pub fn decode(
    char_string: &[u8],
    global_subrs: &Index<'_>,
    local_subrs: Option<&Index<'_>>,
) -> Result<Vec<Token<Type2Op>>, CFFError> {
    let mut decoder = Decoder {
        global_subrs,
        local_subrs,
        hstem_count: 0,
        vstem_count: 0,
        ended: false,
    };
    let mut seq = Vec::new();
    decoder.parse(char_string, 0, &mut seq)?;
    Ok(seq)
}

#[derive(Copy, Clone)]
enum SubrKind {
    Local,
    Global,
}

struct Decoder<'a, 'data> {
    global_subrs: &'a Index<'data>,
    local_subrs: Option<&'a Index<'data>>,
    hstem_count: usize,
    vstem_count: usize,
    ended: bool,
}

impl<'data> Decoder<'_, 'data> {
    fn parse(
        &mut self,
        char_string: &[u8],
        depth: u8,
        seq: &mut Vec<Token<Type2Op>>,
    ) -> Result<(), CFFError> {
        let mut ctxt = ReadScope::new(char_string).ctxt();
        while ctxt.bytes_available() && !self.ended {
            let b0 = ctxt.read_u8()?;
            match b0 {
                operator::SHORT_INT => push_number(seq, f64::from(ctxt.read_i16be()?))?,
                operator::FIXED_16_16 => {
                    let int = ctxt.read_i16be()?;
                    let frac = ctxt.read_u16be()?;
                    push_number(seq, f64::from(int) + f64::from(frac) / 65535.0)?
                }
                0..=31 => {
                    let key = read_key(b0, &mut ctxt)?;
                    let op = match Type2Op::from_key(key) {
                        Some(op) => op,
                        None => {
                            warn!("unknown Type 2 charstring operator {}", key);
                            continue;
                        }
                    };
                    match op {
                        Type2Op::CallSubr if self.local_subrs.map_or(false, |s| !s.is_empty()) => {
                            self.call_subr(SubrKind::Local, depth, seq)?
                        }
                        Type2Op::CallGSubr if !self.global_subrs.is_empty() => {
                            self.call_subr(SubrKind::Global, depth, seq)?
                        }
                        Type2Op::HStem | Type2Op::HStemHm => {
                            self.hstem_count += trailing_numbers(seq) / 2;
                            seq.push(Token::Operator(op));
                        }
                        Type2Op::VStem | Type2Op::VStemHm => {
                            self.vstem_count += trailing_numbers(seq) / 2;
                            seq.push(Token::Operator(op));
                        }
                        Type2Op::HintMask | Type2Op::CntrMask => {
                            // Operands before the first hintmask are an implicit vstem.
                            self.vstem_count += trailing_numbers(seq) / 2;
                            let len = (self.hstem_count + self.vstem_count + 7) / 8;
                            let mask = ctxt.read_slice(len)?;
                            seq.push(Token::Operator(op));
                            seq.push(Token::Mask(TinyVec::from(mask)));
                        }
                        Type2Op::EndChar => {
                            seq.push(Token::Operator(op));
                            self.ended = true;
                        }
                        _ => seq.push(Token::Operator(op)),
                    }
                }
                _ => push_number(seq, f64::from(read_integer(b0, &mut ctxt)?))?,
            }
        }

        Ok(())
    }

    fn call_subr(
        &mut self,
        kind: SubrKind,
        depth: u8,
        seq: &mut Vec<Token<Type2Op>>,
    ) -> Result<(), CFFError> {
        let operand = match seq.pop() {
            Some(Token::Number(n)) => n,
            other => {
                warn!("subroutine call with non-numeric operand {:?}", other);
                return Ok(());
            }
        };

        let subr = match self.subr(kind, operand) {
            Ok(subr) => subr,
            Err(err) => {
                warn!("{}: {}", err, operand);
                return Ok(());
            }
        };
        if depth >= STACK_LIMIT {
            return Err(CFFError::NestingLimitReached);
        }
        self.parse(subr, depth + 1, seq)?;
        if seq.last() == Some(&Token::Operator(Type2Op::Return)) {
            seq.pop();
        }

        Ok(())
    }

    fn subr(&self, kind: SubrKind, operand: f64) -> Result<&'data [u8], CFFError> {
        let index = match kind {
            SubrKind::Local => self.local_subrs.ok_or(CFFError::InvalidSubroutineIndex)?,
            SubrKind::Global => self.global_subrs,
        };
        let bias = calc_subroutine_bias(index.len());
        conv_subroutine_index(operand as i32, bias)
            .and_then(|i| index.read_object(i))
            .ok_or(CFFError::InvalidSubroutineIndex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::tests::index;
    use crate::tests::writer::{self, Value, Value::*};

    use Token::{Mask, Number, Operator};

    fn ops(values: &[Value]) -> Vec<u8> {
        writer::convert(values)
    }

    fn read_index(data: &[u8]) -> Index<'_> {
        ReadScope::new(data).read::<Index<'_>>().unwrap()
    }

    fn tokens_to_string(tokens: &[Token<Type2Op>]) -> String {
        tokens
            .iter()
            .map(|token| token.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_decode_numbers() {
        let data = ops(&[
            CFFInt(1),
            Raw(&[28, 0x7f, 0xff]),
            Raw(&[28, 0x80, 0x00]),
            Fixed(1.5),
            Op(14),
        ]);
        let tokens = decode(&data, &Index::empty(), None).unwrap();
        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[0], Number(1.0));
        assert_eq!(tokens[1], Number(32767.0));
        assert_eq!(tokens[2], Number(-32768.0));
        match tokens[3] {
            Number(n) => assert!((n - 1.5).abs() < 0.0001),
            _ => panic!("expected a number"),
        }
        assert_eq!(tokens[4], Operator(Type2Op::EndChar));
    }

    #[test]
    fn test_decode_stops_after_endchar() {
        let data = ops(&[CFFInt(1), CFFInt(2), Op(21), Op(14), CFFInt(5), Op(22)]);
        let tokens = decode(&data, &Index::empty(), None).unwrap();
        assert_eq!(tokens_to_string(&tokens), "1 2 rmoveto endchar");
    }

    #[test]
    fn test_unknown_operator_is_skipped() {
        let data = ops(&[Op(9), EscOp(8), CFFInt(1), Op(22), Op(14)]);
        let tokens = decode(&data, &Index::empty(), None).unwrap();
        assert_eq!(tokens_to_string(&tokens), "1 hmoveto endchar");
    }

    #[test]
    fn test_hintmask_length() {
        // 3 hstems, 6 vstems (3 explicit, 3 implicit) = 9 stems = 2 mask bytes
        let data = ops(&[
            CFFInt(10),
            CFFInt(10),
            CFFInt(30),
            CFFInt(10),
            CFFInt(50),
            CFFInt(10),
            Op(18),
            CFFInt(10),
            CFFInt(10),
            CFFInt(30),
            CFFInt(10),
            CFFInt(50),
            CFFInt(10),
            Op(23),
            CFFInt(10),
            CFFInt(10),
            CFFInt(30),
            CFFInt(10),
            CFFInt(50),
            CFFInt(10),
            Op(19),
            Raw(&[0xff, 0x80]),
            CFFInt(0),
            CFFInt(0),
            Op(21),
            Op(14),
        ]);
        let tokens = decode(&data, &Index::empty(), None).unwrap();
        let mask = tokens
            .iter()
            .find_map(|token| match token {
                Mask(mask) => Some(mask.to_vec()),
                _ => None,
            })
            .unwrap();
        assert_eq!(mask, vec![0xff, 0x80]);
        assert!(tokens_to_string(&tokens).ends_with("hintmask <ff80> 0 0 rmoveto endchar"));
    }

    #[test]
    fn test_cntrmask_without_stems() {
        let data = ops(&[Op(20), CFFInt(0), Op(22), Op(14)]);
        let tokens = decode(&data, &Index::empty(), None).unwrap();
        assert_eq!(
            tokens,
            vec![
                Operator(Type2Op::CntrMask),
                Mask(TinyVec::new()),
                Number(0.0),
                Operator(Type2Op::HMoveTo),
                Operator(Type2Op::EndChar),
            ]
        );
    }

    #[test]
    fn test_truncated_hintmask() {
        let data = ops(&[CFFInt(1), CFFInt(2), Op(1), Op(19)]);
        assert_eq!(
            decode(&data, &Index::empty(), None),
            Err(CFFError::ParseError(ParseError::BadEof))
        );
    }

    #[test]
    fn test_local_and_global_subrs() {
        let local = index(&[ops(&[CFFInt(10), Op(6), Op(11)])]);
        let local = read_index(&local);
        let global = index(&[
            ops(&[CFFInt(20), Op(7), Op(11)]),
            ops(&[CFFInt(30), Op(22), Op(11)]),
        ]);
        let global = read_index(&global);

        // With a bias of 107, -107 is the first subroutine
        let data = ops(&[
            CFFInt(-106),
            Op(29),
            CFFInt(-107),
            Op(10),
            CFFInt(-107),
            Op(29),
            Op(14),
        ]);
        let tokens = decode(&data, &global, Some(&local)).unwrap();
        assert_eq!(
            tokens_to_string(&tokens),
            "30 hmoveto 10 hlineto 20 vlineto endchar"
        );
    }

    #[test]
    fn test_invalid_subr_index_is_skipped() {
        let local = index(&[ops(&[CFFInt(10), Op(6), Op(11)])]);
        let local = read_index(&local);
        let data = ops(&[CFFInt(0), Op(22), CFFInt(5), Op(10), Op(14)]);
        let tokens = decode(&data, &Index::empty(), Some(&local)).unwrap();
        assert_eq!(tokens_to_string(&tokens), "0 hmoveto endchar");
    }

    #[test]
    fn test_callsubr_without_subrs_is_kept() {
        let data = ops(&[CFFInt(0), Op(10), Op(14)]);
        let tokens = decode(&data, &Index::empty(), None).unwrap();
        assert_eq!(tokens_to_string(&tokens), "0 callsubr endchar");
    }

    #[test]
    fn test_endchar_in_subr() {
        let local = index(&[ops(&[CFFInt(1), Op(22), Op(14), CFFInt(2), Op(22)])]);
        let local = read_index(&local);
        let data = ops(&[CFFInt(-107), Op(10), CFFInt(3), Op(4)]);
        let tokens = decode(&data, &Index::empty(), Some(&local)).unwrap();
        assert_eq!(tokens_to_string(&tokens), "1 hmoveto endchar");
    }

    #[test]
    fn test_subr_without_return() {
        let global = index(&[ops(&[CFFInt(1), CFFInt(2), Op(21)])]);
        let global = read_index(&global);
        let data = ops(&[CFFInt(-107), Op(29), Op(14)]);
        let tokens = decode(&data, &global, None).unwrap();
        assert_eq!(tokens_to_string(&tokens), "1 2 rmoveto endchar");
    }

    #[test]
    fn test_recursive_subrs() {
        let global = index(&[ops(&[CFFInt(-107), Op(10), Op(11)])]);
        let global = read_index(&global);
        let local = index(&[ops(&[CFFInt(-107), Op(29), Op(11)])]);
        let local = read_index(&local);
        let data = ops(&[CFFInt(-107), Op(29), Op(14)]);
        assert_eq!(
            decode(&data, &global, Some(&local)),
            Err(CFFError::NestingLimitReached)
        );
    }
}
