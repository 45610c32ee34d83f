//! Glyph outline generation for CFF.
//!
//! Charstrings are decoded into Type 1 tokens (Type 2 charstrings are normalized first) and then
//! interpreted into a [GlyphPath]. Rendered glyphs are cached per glyph id on the [Font].

use std::convert::TryFrom;
use std::sync::{Arc, OnceLock};

use log::warn;
use pathfinder_geometry::line_segment::LineSegment2F;
use pathfinder_geometry::rect::RectF;
use pathfinder_geometry::vector::{vec2f, Vector2F};

use crate::error::ParseError;
use crate::outline::{OutlineBuilder, OutlineSink};

use super::charstring::{normalize, type1, type2, CharstringType, Token, Type1Op, Type2Op};
use super::encoding::STANDARD_ENCODING;
use super::{CFFError, Font, Operator, SID};

/// Maximum nesting of `seac` components.
pub(crate) const SEAC_DEPTH_LIMIT: u8 = 2;

/// A drawing command in design units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Vector2F),
    LineTo(Vector2F),
    /// A cubic Bézier curve: two control points and the end point.
    CurveTo(Vector2F, Vector2F, Vector2F),
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphPath {
    commands: Vec<PathCommand>,
}

/// A rendered glyph.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub path: GlyphPath,
    pub advance_width: f32,
    /// The left side bearing point set by `hsbw` or `sbw`.
    pub lsb: Vector2F,
    /// The control point bounds of `path`.
    pub bbox: RectF,
    /// Horizontal stem hints as (y, height).
    pub hstems: Vec<(f32, f32)>,
    /// Vertical stem hints as (x, width).
    pub vstems: Vec<(f32, f32)>,
}

/// Rendered glyphs, one slot per glyph id.
pub(crate) struct GlyphCache {
    slots: Box<[OnceLock<Arc<Glyph>>]>,
}

struct Renderer<'f, 'a> {
    font: &'f Font<'a>,
    glyph_id: u16,
    depth: u8,
    path: GlyphPath,
    current: Vector2F,
    lsb: Vector2F,
    width: Vector2F,
    open: bool,
    flex_mode: bool,
    flex_points: Vec<Vector2F>,
    hstems: Vec<(f32, f32)>,
    vstems: Vec<(f32, f32)>,
}

impl GlyphPath {
    pub fn new() -> GlyphPath {
        GlyphPath::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All points of the path, including curve control points.
    pub fn points(&self) -> impl Iterator<Item = Vector2F> + '_ {
        self.commands.iter().flat_map(|command| {
            let (points, len) = match *command {
                PathCommand::MoveTo(to) | PathCommand::LineTo(to) => ([to, to, to], 1),
                PathCommand::CurveTo(ctrl1, ctrl2, to) => ([ctrl1, ctrl2, to], 3),
                PathCommand::Close => ([Vector2F::zero(); 3], 0),
            };
            points.into_iter().take(len)
        })
    }

    /// The bounding box of all points of the path. An empty path has an empty box at the origin.
    pub fn bounds(&self) -> RectF {
        let mut points = self.points();
        let first = match points.next() {
            Some(point) => point,
            None => return RectF::new(Vector2F::zero(), Vector2F::zero()),
        };
        let (min, max) = points.fold((first, first), |(min, max), point| {
            (min.min(point), max.max(point))
        });
        RectF::from_points(min, max)
    }

    pub fn translate(&mut self, offset: Vector2F) {
        for command in self.commands.iter_mut() {
            *command = match *command {
                PathCommand::MoveTo(to) => PathCommand::MoveTo(to + offset),
                PathCommand::LineTo(to) => PathCommand::LineTo(to + offset),
                PathCommand::CurveTo(ctrl1, ctrl2, to) => {
                    PathCommand::CurveTo(ctrl1 + offset, ctrl2 + offset, to + offset)
                }
                PathCommand::Close => PathCommand::Close,
            }
        }
    }

    pub fn extend(&mut self, other: &GlyphPath) {
        self.commands.extend_from_slice(&other.commands)
    }

    /// Deliver the path to `sink`.
    pub fn replay<S: OutlineSink>(&self, sink: &mut S) {
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(to) => sink.move_to(to),
                PathCommand::LineTo(to) => sink.line_to(to),
                PathCommand::CurveTo(ctrl1, ctrl2, to) => {
                    sink.cubic_curve_to(LineSegment2F::new(ctrl1, ctrl2), to)
                }
                PathCommand::Close => sink.close(),
            }
        }
    }
}

impl GlyphCache {
    pub(crate) fn new(n_glyphs: usize) -> GlyphCache {
        GlyphCache {
            slots: (0..n_glyphs).map(|_| OnceLock::new()).collect(),
        }
    }

    fn get(&self, glyph_id: u16) -> Option<Arc<Glyph>> {
        self.slots.get(usize::from(glyph_id))?.get().cloned()
    }

    // Returns the cached glyph, which is `glyph` unless another thread got there first.
    fn insert(&self, glyph_id: u16, glyph: Glyph) -> Arc<Glyph> {
        let glyph = Arc::new(glyph);
        match self.slots.get(usize::from(glyph_id)) {
            Some(slot) => {
                let _ = slot.set(Arc::clone(&glyph));
                slot.get().cloned().unwrap_or(glyph)
            }
            None => glyph,
        }
    }
}

impl<'a> Font<'a> {
    /// The rendered glyph for `glyph_id`.
    ///
    /// Glyph ids beyond the end of the CharStrings INDEX resolve to `.notdef`. Successful results
    /// are cached, so repeated requests (from any thread) return the same `Arc`.
    pub fn glyph(&self, glyph_id: u16) -> Result<Arc<Glyph>, CFFError> {
        let glyph_id = self.resolve_glyph_id(glyph_id);
        if let Some(glyph) = self.cache.get(glyph_id) {
            return Ok(glyph);
        }
        let glyph = self.render(glyph_id, 0)?;
        Ok(self.cache.insert(glyph_id, glyph))
    }

    pub fn glyph_by_name(&self, name: &str) -> Result<Arc<Glyph>, CFFError> {
        let glyph_id = self.glyph_id_for_name(name)?;
        self.glyph(glyph_id)
    }

    pub fn glyph_by_cid(&self, cid: u16) -> Result<Arc<Glyph>, CFFError> {
        let glyph_id = self.glyph_id_for_cid(cid)?;
        self.glyph(glyph_id)
    }

    pub fn advance_width(&self, glyph_id: u16) -> Result<f32, CFFError> {
        self.glyph(glyph_id).map(|glyph| glyph.advance_width)
    }

    pub fn bounding_box(&self, glyph_id: u16) -> Result<RectF, CFFError> {
        self.glyph(glyph_id).map(|glyph| glyph.bbox)
    }

    /// The decoded Type 2 charstring of `glyph_id` with subroutines inlined.
    ///
    /// Returns `WrongKind` for a font with Type 1 charstrings.
    pub fn type2_tokens(&self, glyph_id: u16) -> Result<Vec<Token<Type2Op>>, CFFError> {
        if self.charstring_type != CharstringType::Type2 {
            return Err(CFFError::ParseError(ParseError::WrongKind));
        }
        let glyph_id = self.resolve_glyph_id(glyph_id);
        let (_, local_subrs) = self.private_data(glyph_id);
        type2::decode(self.char_string(glyph_id)?, &self.global_subr_index, local_subrs)
    }

    /// The Type 1 tokens of `glyph_id`, as interpreted by the renderer.
    ///
    /// Type 2 charstrings are decoded and then normalized using the widths of the applicable
    /// Private DICT.
    pub fn type1_tokens(&self, glyph_id: u16) -> Result<Vec<Token<Type1Op>>, CFFError> {
        let glyph_id = self.resolve_glyph_id(glyph_id);
        let (private_dict, local_subrs) = self.private_data(glyph_id);
        let char_string = self.char_string(glyph_id)?;
        match self.charstring_type {
            CharstringType::Type1 => type1::decode(char_string, local_subrs),
            CharstringType::Type2 => {
                let tokens = type2::decode(char_string, &self.global_subr_index, local_subrs)?;
                let (default_width_x, nominal_width_x) = match private_dict {
                    Some(private_dict) => (
                        private_dict
                            .get_f64(Operator::DefaultWidthX)
                            .unwrap_or(Ok(0.0))?,
                        private_dict
                            .get_f64(Operator::NominalWidthX)
                            .unwrap_or(Ok(0.0))?,
                    ),
                    None => (0.0, 0.0),
                };
                Ok(normalize::normalize(&tokens, default_width_x, nominal_width_x))
            }
        }
    }

    fn resolve_glyph_id(&self, glyph_id: u16) -> u16 {
        if usize::from(glyph_id) < self.num_glyphs() {
            glyph_id
        } else {
            0
        }
    }

    fn char_string(&self, glyph_id: u16) -> Result<&'a [u8], CFFError> {
        self.char_strings_index
            .read_object(usize::from(glyph_id))
            .ok_or(CFFError::ParseError(ParseError::BadIndex))
    }

    fn render(&self, glyph_id: u16, depth: u8) -> Result<Glyph, CFFError> {
        let tokens = self.type1_tokens(glyph_id)?;
        let mut renderer = Renderer::new(self, glyph_id, depth);
        renderer.run(&tokens)?;
        Ok(renderer.finish())
    }

    // A seac component uses the cached glyph when there is one, but is not added to the cache.
    fn seac_component(&self, glyph_id: u16, depth: u8) -> Result<Arc<Glyph>, CFFError> {
        match self.cache.get(glyph_id) {
            Some(glyph) => Ok(glyph),
            None => self.render(glyph_id, depth).map(Arc::new),
        }
    }
}

impl OutlineBuilder for Font<'_> {
    type Error = CFFError;

    fn visit<S: OutlineSink>(&mut self, glyph_index: u16, sink: &mut S) -> Result<(), Self::Error> {
        self.glyph(glyph_index)?.path.replay(sink);
        Ok(())
    }
}

impl<'f, 'a> Renderer<'f, 'a> {
    fn new(font: &'f Font<'a>, glyph_id: u16, depth: u8) -> Self {
        Renderer {
            font,
            glyph_id,
            depth,
            path: GlyphPath::new(),
            current: Vector2F::zero(),
            lsb: Vector2F::zero(),
            width: Vector2F::zero(),
            open: false,
            flex_mode: false,
            flex_points: Vec::new(),
            hstems: Vec::new(),
            vstems: Vec::new(),
        }
    }

    fn run(&mut self, tokens: &[Token<Type1Op>]) -> Result<(), CFFError> {
        let mut numbers: Vec<f32> = Vec::new();
        for token in tokens {
            match token {
                Token::Number(n) => numbers.push(*n as f32),
                Token::Mask(_) => {}
                Token::Operator(Type1Op::Div) => self.div(&mut numbers),
                Token::Operator(op) => {
                    let end = self.operator(*op, &numbers)?;
                    numbers.clear();
                    if end {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    fn finish(self) -> Glyph {
        Glyph {
            bbox: self.path.bounds(),
            path: self.path,
            advance_width: self.width.x(),
            lsb: self.lsb,
            hstems: self.hstems,
            vstems: self.vstems,
        }
    }

    /// Interpret one operator. Returns `true` at the end of the charstring.
    fn operator(&mut self, op: Type1Op, n: &[f32]) -> Result<bool, CFFError> {
        let required = match op {
            Type1Op::HMoveTo | Type1Op::VMoveTo | Type1Op::HLineTo | Type1Op::VLineTo => 1,
            Type1Op::RMoveTo | Type1Op::RLineTo | Type1Op::Hsbw | Type1Op::SetCurrentPoint => 2,
            Type1Op::HStem | Type1Op::VStem => 2,
            Type1Op::VHCurveTo | Type1Op::HVCurveTo | Type1Op::Sbw => 4,
            Type1Op::Seac => 5,
            Type1Op::RRCurveTo | Type1Op::HStem3 | Type1Op::VStem3 => 6,
            Type1Op::CallOtherSubr => 1,
            _ => 0,
        };
        if n.len() < required {
            warn!(
                "{} with {} arguments in glyph {}",
                op,
                n.len(),
                self.glyph_id
            );
            return Ok(false);
        }

        match op {
            Type1Op::RMoveTo => self.move_by(vec2f(n[0], n[1])),
            Type1Op::HMoveTo => self.move_by(vec2f(n[0], 0.0)),
            Type1Op::VMoveTo => self.move_by(vec2f(0.0, n[0])),
            Type1Op::RLineTo => self.line_by(vec2f(n[0], n[1])),
            Type1Op::HLineTo => self.line_by(vec2f(n[0], 0.0)),
            Type1Op::VLineTo => self.line_by(vec2f(0.0, n[0])),
            Type1Op::RRCurveTo => self.curve_by(
                vec2f(n[0], n[1]),
                vec2f(n[2], n[3]),
                vec2f(n[4], n[5]),
            ),
            Type1Op::VHCurveTo => self.curve_by(
                vec2f(0.0, n[0]),
                vec2f(n[1], n[2]),
                vec2f(n[3], 0.0),
            ),
            Type1Op::HVCurveTo => self.curve_by(
                vec2f(n[0], 0.0),
                vec2f(n[1], n[2]),
                vec2f(0.0, n[3]),
            ),
            Type1Op::ClosePath => self.close(),
            Type1Op::Hsbw => {
                self.lsb = vec2f(n[0], 0.0);
                self.width = vec2f(n[1], 0.0);
                self.current = self.lsb;
            }
            Type1Op::Sbw => {
                self.lsb = vec2f(n[0], n[1]);
                self.width = vec2f(n[2], n[3]);
                self.current = self.lsb;
            }
            Type1Op::SetCurrentPoint => self.current = vec2f(n[0], n[1]),
            Type1Op::HStem => self.hstems.push((self.lsb.y() + n[0], n[1])),
            Type1Op::VStem => self.vstems.push((self.lsb.x() + n[0], n[1])),
            Type1Op::HStem3 => {
                for stem in n[..6].chunks_exact(2) {
                    self.hstems.push((self.lsb.y() + stem[0], stem[1]));
                }
            }
            Type1Op::VStem3 => {
                for stem in n[..6].chunks_exact(2) {
                    self.vstems.push((self.lsb.x() + stem[0], stem[1]));
                }
            }
            Type1Op::CallOtherSubr => match n[n.len() - 1] as i32 {
                0 => self.end_flex(),
                1 => {
                    self.flex_mode = true;
                    self.flex_points.clear();
                }
                other => warn!("unexpected othersubr {} in glyph {}", other, self.glyph_id),
            },
            Type1Op::Seac => self.seac(n[0], n[1], n[2], n[3], n[4]),
            Type1Op::DotSection => {}
            Type1Op::EndChar => return Ok(true),
            Type1Op::CallSubr | Type1Op::Return | Type1Op::Pop | Type1Op::Div => {
                warn!("unexpected {} in glyph {}", op, self.glyph_id)
            }
        }

        Ok(false)
    }

    fn div(&mut self, numbers: &mut Vec<f32>) {
        match (numbers.pop(), numbers.pop()) {
            (Some(b), Some(a)) if b != 0.0 => numbers.push(a / b),
            _ => warn!("invalid div in glyph {}", self.glyph_id),
        }
    }

    fn move_by(&mut self, delta: Vector2F) {
        if self.flex_mode {
            self.flex_points.push(delta);
            return;
        }
        self.current = self.current + delta;
        self.path.push(PathCommand::MoveTo(self.current));
        self.open = true;
    }

    fn line_by(&mut self, delta: Vector2F) {
        self.ensure_open();
        self.current = self.current + delta;
        self.path.push(PathCommand::LineTo(self.current));
    }

    fn curve_by(&mut self, d1: Vector2F, d2: Vector2F, d3: Vector2F) {
        self.ensure_open();
        let ctrl1 = self.current + d1;
        let ctrl2 = ctrl1 + d2;
        let to = ctrl2 + d3;
        self.path.push(PathCommand::CurveTo(ctrl1, ctrl2, to));
        self.current = to;
    }

    fn ensure_open(&mut self) {
        if self.open {
            return;
        }
        if self.path.is_empty() {
            warn!("path operator without moveto in glyph {}", self.glyph_id);
        }
        self.path.push(PathCommand::MoveTo(self.current));
        self.open = true;
    }

    fn close(&mut self) {
        if self.open {
            self.path.push(PathCommand::Close);
            self.open = false;
        } else {
            warn!("closepath without an open subpath in glyph {}", self.glyph_id);
        }
    }

    // The first flex point is the reference point, relative to the current point. The next six
    // are the control and end points of the two curves.
    fn end_flex(&mut self) {
        self.flex_mode = false;
        let points = std::mem::take(&mut self.flex_points);
        if points.len() < 7 {
            warn!(
                "flex with {} points in glyph {}",
                points.len(),
                self.glyph_id
            );
            return;
        }
        self.curve_by(points[0] + points[1], points[2], points[3]);
        self.curve_by(points[4], points[5], points[6]);
    }

    fn seac(&mut self, asb: f32, adx: f32, ady: f32, bchar: f32, achar: f32) {
        if self.font.is_cid_keyed() {
            warn!("seac in CID-keyed glyph {}", self.glyph_id);
            return;
        }

        if let Some(base) = self.component(bchar) {
            self.path.extend(&base.path);
        }
        if let Some(accent) = self.component(achar) {
            let mut path = accent.path.clone();
            path.translate(vec2f(self.lsb.x() + adx - asb, self.lsb.y() + ady));
            self.path.extend(&path);
        }
        self.open = false;
    }

    fn component(&self, code: f32) -> Option<Arc<Glyph>> {
        let code = match seac_code(code) {
            Ok(code) => code,
            Err(err) => {
                warn!("{} {} in glyph {}", err, code, self.glyph_id);
                return None;
            }
        };
        let name = self
            .font
            .strings()
            .get(SID::from(STANDARD_ENCODING[usize::from(code)]));
        let glyph_id = match self.font.glyph_id_for_name(&name) {
            Ok(glyph_id) if glyph_id != 0 && glyph_id != self.glyph_id => glyph_id,
            _ => {
                warn!(
                    "seac component {} not found for glyph {}",
                    name, self.glyph_id
                );
                return None;
            }
        };
        if self.depth >= SEAC_DEPTH_LIMIT {
            warn!("seac nesting too deep in glyph {}", self.glyph_id);
            return None;
        }

        match self.font.seac_component(glyph_id, self.depth + 1) {
            Ok(glyph) => Some(glyph),
            Err(err) => {
                warn!("seac component {} failed: {}", name, err);
                None
            }
        }
    }
}

/// A StandardEncoding code given as a `seac` operand.
fn seac_code(code: f32) -> Result<u8, CFFError> {
    if code.fract() != 0.0 {
        return Err(CFFError::InvalidSeacCode);
    }
    u8::try_from(code as i32).map_err(|_| CFFError::InvalidSeacCode)
}
