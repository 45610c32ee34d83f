//! Conversion of Type 2 charstring tokens into the Type 1 operator set.
//!
//! The renderer only understands Type 1 operators, so the Type 2 operators that take a variable
//! number of arguments are expanded into the equivalent sequence of Type 1 operators. The
//! advance width, optional in Type 2, becomes an explicit `hsbw`.

use log::warn;

use super::{Token, Type1Op, Type2Op};

/// Convert decoded Type 2 tokens into Type 1 tokens.
///
/// `default_width_x` and `nominal_width_x` come from the Private DICT that applies to the glyph.
pub fn normalize(
    tokens: &[Token<Type2Op>],
    default_width_x: f64,
    nominal_width_x: f64,
) -> Vec<Token<Type1Op>> {
    let mut normalizer = Normalizer {
        default_width_x,
        nominal_width_x,
        output: Vec::with_capacity(tokens.len()),
        path_count: 0,
        width_emitted: false,
    };

    let mut numbers = Vec::new();
    for token in tokens {
        match token {
            Token::Number(n) => numbers.push(*n),
            Token::Operator(op) => {
                normalizer.operator(*op, &numbers);
                numbers.clear();
            }
            Token::Mask(_) => {}
        }
    }

    normalizer.output
}

struct Normalizer {
    default_width_x: f64,
    nominal_width_x: f64,
    output: Vec<Token<Type1Op>>,
    path_count: usize,
    width_emitted: bool,
}

impl Normalizer {
    fn operator(&mut self, op: Type2Op, numbers: &[f64]) {
        match op {
            Type2Op::HStem | Type2Op::HStemHm => {
                let numbers = self.clear_stack(numbers, numbers.len() % 2 == 1);
                self.expand_stems(numbers, Type1Op::HStem);
            }
            Type2Op::VStem | Type2Op::VStemHm => {
                let numbers = self.clear_stack(numbers, numbers.len() % 2 == 1);
                self.expand_stems(numbers, Type1Op::VStem);
            }
            Type2Op::HintMask | Type2Op::CntrMask => {
                let numbers = self.clear_stack(numbers, numbers.len() % 2 == 1);
                // Stems preceding the first mask are an implicit vstem.
                self.expand_stems(numbers, Type1Op::VStem);
            }
            Type2Op::VMoveTo | Type2Op::HMoveTo => {
                let numbers = self.clear_stack(numbers, numbers.len() > 1);
                self.mark_path();
                let op = if op == Type2Op::VMoveTo {
                    Type1Op::VMoveTo
                } else {
                    Type1Op::HMoveTo
                };
                self.add_command(numbers, op);
            }
            Type2Op::RMoveTo => {
                let numbers = self.clear_stack(numbers, numbers.len() > 2);
                self.mark_path();
                self.add_command(numbers, Type1Op::RMoveTo);
            }
            Type2Op::EndChar => {
                let numbers = self.clear_stack(numbers, numbers.len() == 5 || numbers.len() == 1);
                self.close_path();
                if numbers.len() == 4 {
                    // Deprecated seac form: adx ady bchar achar endchar
                    self.output.push(Token::Number(0.0));
                    self.add_command(numbers, Type1Op::Seac);
                }
                self.add_command(&[], Type1Op::EndChar);
            }
            Type2Op::RLineTo => {
                for line in numbers.chunks_exact(2) {
                    self.add_command(line, Type1Op::RLineTo);
                }
            }
            Type2Op::HLineTo => self.add_alternating_line(numbers, true),
            Type2Op::VLineTo => self.add_alternating_line(numbers, false),
            Type2Op::RRCurveTo => {
                for curve in numbers.chunks_exact(6) {
                    self.add_command(curve, Type1Op::RRCurveTo);
                }
            }
            Type2Op::HVCurveTo => self.add_alternating_curve(numbers, true),
            Type2Op::VHCurveTo => self.add_alternating_curve(numbers, false),
            Type2Op::HHCurveTo => self.add_curve(numbers, true),
            Type2Op::VVCurveTo => self.add_curve(numbers, false),
            Type2Op::RCurveLine => {
                if numbers.len() < 2 {
                    warn!("rcurveline with {} arguments", numbers.len());
                    return;
                }
                let (curves, line) = numbers.split_at(numbers.len() - 2);
                for curve in curves.chunks_exact(6) {
                    self.add_command(curve, Type1Op::RRCurveTo);
                }
                self.add_command(line, Type1Op::RLineTo);
            }
            Type2Op::RLineCurve => {
                if numbers.len() < 6 {
                    warn!("rlinecurve with {} arguments", numbers.len());
                    return;
                }
                let (lines, curve) = numbers.split_at(numbers.len() - 6);
                for line in lines.chunks_exact(2) {
                    self.add_command(line, Type1Op::RLineTo);
                }
                self.add_command(curve, Type1Op::RRCurveTo);
            }
            Type2Op::HFlex | Type2Op::Flex | Type2Op::HFlex1 | Type2Op::Flex1 => {
                self.add_flex(op, numbers)
            }
            // Only left in the token stream when the font has no global subroutines
            Type2Op::CallGSubr => warn!("dropping callgsubr without global subroutines"),
            _ => match Type1Op::from_key(op.key()) {
                Some(type1_op) => self.add_command(numbers, type1_op),
                None => warn!("dropping unsupported Type 2 operator {}", op),
            },
        }
    }

    /// Emit the advance width on the first stack-clearing operator, returning the remaining
    /// arguments.
    ///
    /// The `hsbw` is placed at the start of the output, ahead of any non-clearing operators such
    /// as `dotsection` that came first.
    fn clear_stack<'n>(&mut self, numbers: &'n [f64], has_width: bool) -> &'n [f64] {
        if self.width_emitted {
            return numbers;
        }
        self.width_emitted = true;

        let (width, rest) = match numbers.split_first() {
            Some((&delta, rest)) if has_width => (delta + self.nominal_width_x, rest),
            _ => (self.default_width_x, numbers),
        };
        self.output.splice(
            0..0,
            [
                Token::Number(0.0),
                Token::Number(width),
                Token::Operator(Type1Op::Hsbw),
            ],
        );
        rest
    }

    // Type 2 stems are relative to the previous stem. Emit each as an absolute position and width.
    fn expand_stems(&mut self, numbers: &[f64], op: Type1Op) {
        let mut prev_end = 0.0;
        for stem in numbers.chunks_exact(2) {
            let pos = prev_end + stem[0];
            self.add_command(&[pos, stem[1]], op);
            prev_end = pos + stem[1];
        }
    }

    fn mark_path(&mut self) {
        if self.path_count > 0 {
            self.close_path();
        }
        self.path_count += 1;
    }

    fn close_path(&mut self) {
        if self.path_count > 0 && self.output.last() != Some(&Token::Operator(Type1Op::ClosePath)) {
            self.add_command(&[], Type1Op::ClosePath);
        }
    }

    fn add_alternating_line(&mut self, numbers: &[f64], horizontal: bool) {
        for (i, &delta) in numbers.iter().enumerate() {
            let op = if (i % 2 == 0) == horizontal {
                Type1Op::HLineTo
            } else {
                Type1Op::VLineTo
            };
            self.add_command(&[delta], op);
        }
    }

    fn add_alternating_curve(&mut self, mut numbers: &[f64], mut horizontal: bool) {
        while numbers.len() >= 4 {
            let last = numbers.len() == 5;
            let n = numbers;
            let last_delta = if last { n[4] } else { 0.0 };
            let curve = if horizontal {
                [n[0], 0.0, n[1], n[2], last_delta, n[3]]
            } else {
                [0.0, n[0], n[1], n[2], n[3], last_delta]
            };
            self.add_command(&curve, Type1Op::RRCurveTo);
            numbers = &numbers[if last { 5 } else { 4 }..];
            horizontal = !horizontal;
        }
    }

    fn add_curve(&mut self, numbers: &[f64], horizontal: bool) {
        let (mut first_delta, mut numbers) = match numbers.split_first() {
            Some((&delta, rest)) if numbers.len() % 4 == 1 => (delta, rest),
            _ => (0.0, numbers),
        };
        while numbers.len() >= 4 {
            let n = numbers;
            let curve = if horizontal {
                [n[0], first_delta, n[1], n[2], n[3], 0.0]
            } else {
                [first_delta, n[0], n[1], n[2], 0.0, n[3]]
            };
            self.add_command(&curve, Type1Op::RRCurveTo);
            first_delta = 0.0;
            numbers = &numbers[4..];
        }
    }

    fn add_flex(&mut self, op: Type2Op, n: &[f64]) {
        let required = match op {
            Type2Op::HFlex => 7,
            Type2Op::Flex => 12,
            Type2Op::HFlex1 => 9,
            _ => 11,
        };
        if n.len() < required {
            warn!("{} with {} arguments", op, n.len());
            return;
        }

        let (first, second) = match op {
            Type2Op::HFlex => (
                [n[0], 0.0, n[1], n[2], n[3], 0.0],
                [n[4], 0.0, n[5], -n[2], n[6], 0.0],
            ),
            Type2Op::Flex => (
                [n[0], n[1], n[2], n[3], n[4], n[5]],
                [n[6], n[7], n[8], n[9], n[10], n[11]],
            ),
            Type2Op::HFlex1 => (
                [n[0], n[1], n[2], n[3], n[4], 0.0],
                // The last point returns to the starting y.
                [n[5], 0.0, n[6], n[7], n[8], -(n[1] + n[3] + n[7])],
            ),
            _ => {
                let dx = n[0] + n[2] + n[4] + n[6] + n[8];
                let dy = n[1] + n[3] + n[5] + n[7] + n[9];
                let (x, y) = if dx.abs() > dy.abs() {
                    (n[10], -dy)
                } else {
                    (-dx, n[10])
                };
                (
                    [n[0], n[1], n[2], n[3], n[4], n[5]],
                    [n[6], n[7], n[8], n[9], x, y],
                )
            }
        };
        self.add_command(&first, Type1Op::RRCurveTo);
        self.add_command(&second, Type1Op::RRCurveTo);
    }

    fn add_command(&mut self, numbers: &[f64], op: Type1Op) {
        self.output
            .extend(numbers.iter().map(|&n| Token::Number(n)));
        self.output.push(Token::Operator(op));
    }
}
