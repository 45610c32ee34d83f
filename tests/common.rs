// Synthetic CFF programs for tests.
//
// This file is `include!`d by the crate's unit tests and used as a module by the integration
// tests, so it only depends on std.

/// Encode an integer the way DICT and charstring operands encode it.
#[allow(dead_code)]
pub fn cff_int(n: i32) -> Vec<u8> {
    match n {
        -107..=107 => vec![(n + 139) as u8],
        108..=1131 => {
            let n = n - 108;
            vec![((n >> 8) + 247) as u8, (n & 0xFF) as u8]
        }
        -1131..=-108 => {
            let n = -n - 108;
            vec![((n >> 8) + 251) as u8, (n & 0xFF) as u8]
        }
        -32768..=32767 => {
            let mut out = vec![28];
            out.extend_from_slice(&(n as i16).to_be_bytes());
            out
        }
        _ => {
            let mut out = vec![29];
            out.extend_from_slice(&n.to_be_bytes());
            out
        }
    }
}

/// A DICT entry with a single offset operand, always five bytes wide.
#[allow(dead_code)]
pub fn dict_offset(offset: usize, op: &[u8]) -> Vec<u8> {
    let mut out = vec![29];
    out.extend_from_slice(&(offset as i32).to_be_bytes());
    out.extend_from_slice(op);
    out
}

/// A `Private` DICT entry: size and offset, both five bytes wide.
#[allow(dead_code)]
pub fn private_op(size: usize, offset: usize) -> Vec<u8> {
    let mut out = vec![29];
    out.extend_from_slice(&(size as i32).to_be_bytes());
    out.extend(dict_offset(offset, &[18]));
    out
}

/// Encode a decimal string such as `-2.25` or `1.5E-3` as a nibble real operand.
#[allow(dead_code)]
pub fn encode_real(s: &str) -> Vec<u8> {
    let mut nibbles = Vec::new();
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        let nibble = match c {
            '0'..='9' => c as u8 - b'0',
            '.' => 0xa,
            'E' if chars.peek() == Some(&'-') => {
                chars.next();
                0xc
            }
            'E' => 0xb,
            '-' => 0xe,
            _ => panic!("unexpected character {:?} in real", c),
        };
        nibbles.push(nibble);
    }
    nibbles.push(0xf);
    if nibbles.len() % 2 == 1 {
        nibbles.push(0xf);
    }
    let mut out = vec![30];
    out.extend(nibbles.chunks(2).map(|pair| (pair[0] << 4) | pair[1]));
    out
}

/// Build an INDEX with four byte offsets.
#[allow(dead_code)]
pub fn index<T: AsRef<[u8]>>(items: &[T]) -> Vec<u8> {
    let mut out = (items.len() as u16).to_be_bytes().to_vec();
    if items.is_empty() {
        return out;
    }
    out.push(4);
    let mut offset = 1u32;
    out.extend_from_slice(&offset.to_be_bytes());
    for item in items {
        offset += item.as_ref().len() as u32;
        out.extend_from_slice(&offset.to_be_bytes());
    }
    for item in items {
        out.extend_from_slice(item.as_ref());
    }
    out
}

/// Wrap tables in an SFNT table directory.
#[allow(dead_code)]
pub fn sfnt_wrap(version: u32, tables: &[(u32, &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&version.to_be_bytes());
    out.extend_from_slice(&(tables.len() as u16).to_be_bytes());
    // search_range, entry_selector, range_shift
    out.extend_from_slice(&[0; 6]);
    let mut offset = 12 + 16 * tables.len();
    for (tag, data) in tables {
        out.extend_from_slice(&tag.to_be_bytes());
        out.extend_from_slice(&0u32.to_be_bytes());
        out.extend_from_slice(&(offset as u32).to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        offset += data.len();
    }
    for (_, data) in tables {
        out.extend_from_slice(data);
    }
    out
}

/// One entry of a CID font's FDArray.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct FdSpec {
    /// Font DICT bytes other than the `Private` entry.
    pub font_dict: Vec<u8>,
    pub private: Vec<u8>,
    pub subrs: Vec<Vec<u8>>,
}

#[allow(dead_code)]
#[derive(Clone)]
struct CidSpec {
    fds: Vec<FdSpec>,
    fd_select: Vec<u8>,
}

#[derive(Default)]
struct Layout {
    char_strings: usize,
    charset: usize,
    encoding: usize,
    private: (usize, usize),
    fd_array: usize,
    fd_select: usize,
}

/// Assembles a complete single-font CFF program.
///
/// Offsets in the Top DICT use the five byte integer form so the layout can be computed before
/// the final offsets are known. CID fonts get a `ROS` of `Adobe-Identity-0`; the registry and
/// ordering strings are added as the first two custom strings (SIDs 391 and 392).
#[allow(dead_code)]
#[derive(Clone)]
pub struct CffBuilder {
    name: Vec<u8>,
    top: Vec<u8>,
    strings: Vec<Vec<u8>>,
    global_subrs: Vec<Vec<u8>>,
    char_strings: Vec<Vec<u8>>,
    charset: Option<Vec<u8>>,
    encoding: Option<Vec<u8>>,
    private: Vec<u8>,
    subrs: Vec<Vec<u8>>,
    cid: Option<CidSpec>,
}

#[allow(dead_code)]
impl CffBuilder {
    /// A font named `Test` with a single empty `.notdef` glyph.
    pub fn new() -> CffBuilder {
        CffBuilder {
            name: b"Test".to_vec(),
            top: Vec::new(),
            strings: Vec::new(),
            global_subrs: Vec::new(),
            char_strings: vec![vec![14]],
            charset: None,
            encoding: None,
            private: Vec::new(),
            subrs: Vec::new(),
            cid: None,
        }
    }

    pub fn name(mut self, name: &str) -> CffBuilder {
        self.name = name.as_bytes().to_vec();
        self
    }

    /// Extra Top DICT bytes, written after `ROS` and before the offset entries.
    pub fn top_dict(mut self, bytes: Vec<u8>) -> CffBuilder {
        self.top = bytes;
        self
    }

    pub fn string(mut self, s: &str) -> CffBuilder {
        self.strings.push(s.as_bytes().to_vec());
        self
    }

    pub fn global_subr(mut self, char_string: Vec<u8>) -> CffBuilder {
        self.global_subrs.push(char_string);
        self
    }

    /// Replace all glyphs.
    pub fn char_strings(mut self, char_strings: Vec<Vec<u8>>) -> CffBuilder {
        self.char_strings = char_strings;
        self
    }

    pub fn char_string(mut self, char_string: Vec<u8>) -> CffBuilder {
        self.char_strings.push(char_string);
        self
    }

    pub fn charset(mut self, bytes: Vec<u8>) -> CffBuilder {
        self.charset = Some(bytes);
        self
    }

    pub fn encoding(mut self, bytes: Vec<u8>) -> CffBuilder {
        self.encoding = Some(bytes);
        self
    }

    /// Private DICT bytes other than `Subrs`.
    pub fn private_dict(mut self, bytes: Vec<u8>) -> CffBuilder {
        self.private = bytes;
        self
    }

    pub fn local_subr(mut self, char_string: Vec<u8>) -> CffBuilder {
        self.subrs.push(char_string);
        self
    }

    pub fn cid(mut self, fds: Vec<FdSpec>, fd_select: Vec<u8>) -> CffBuilder {
        self.cid = Some(CidSpec { fds, fd_select });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut strings = Vec::new();
        if self.cid.is_some() {
            strings.push(b"Adobe".to_vec());
            strings.push(b"Identity".to_vec());
        }
        strings.extend(self.strings.iter().cloned());

        let name_index = index(&[&self.name]);
        let string_index = index(&strings);
        let global_subr_index = index(&self.global_subrs);
        let char_strings_index = index(&self.char_strings);
        let top_index_len = index(&[self.top_dict_bytes(&Layout::default())]).len();

        let base = 4 + name_index.len() + top_index_len + string_index.len() + global_subr_index.len();
        let mut layout = Layout::default();
        let mut body = Vec::new();

        layout.char_strings = base + body.len();
        body.extend_from_slice(&char_strings_index);
        if let Some(charset) = &self.charset {
            layout.charset = base + body.len();
            body.extend_from_slice(charset);
        }
        if let Some(encoding) = &self.encoding {
            layout.encoding = base + body.len();
            body.extend_from_slice(encoding);
        }
        match &self.cid {
            None => {
                let (private, subrs) = private_with_subrs(&self.private, &self.subrs);
                layout.private = (private.len(), base + body.len());
                body.extend(private);
                body.extend(subrs);
            }
            Some(cid) => {
                let fd_privates = cid
                    .fds
                    .iter()
                    .map(|fd| private_with_subrs(&fd.private, &fd.subrs))
                    .collect::<Vec<_>>();
                let placeholder = cid
                    .fds
                    .iter()
                    .map(|fd| [fd.font_dict.clone(), private_op(0, 0)].concat())
                    .collect::<Vec<_>>();
                layout.fd_array = base + body.len();
                let mut pos = layout.fd_array + index(&placeholder).len();
                let mut font_dicts = Vec::new();
                for (fd, (private, subrs)) in cid.fds.iter().zip(&fd_privates) {
                    font_dicts.push([fd.font_dict.clone(), private_op(private.len(), pos)].concat());
                    pos += private.len() + subrs.len();
                }
                body.extend(index(&font_dicts));
                for (private, subrs) in &fd_privates {
                    body.extend_from_slice(private);
                    body.extend_from_slice(subrs);
                }
                layout.fd_select = base + body.len();
                body.extend_from_slice(&cid.fd_select);
            }
        }

        let top_index = index(&[self.top_dict_bytes(&layout)]);
        [
            vec![1, 0, 4, 4],
            name_index,
            top_index,
            string_index,
            global_subr_index,
            body,
        ]
        .concat()
    }

    fn top_dict_bytes(&self, layout: &Layout) -> Vec<u8> {
        let mut dict = Vec::new();
        if self.cid.is_some() {
            dict.extend(cff_int(391));
            dict.extend(cff_int(392));
            dict.extend(cff_int(0));
            dict.extend_from_slice(&[12, 30]);
        }
        dict.extend_from_slice(&self.top);
        if self.charset.is_some() {
            dict.extend(dict_offset(layout.charset, &[15]));
        }
        if self.encoding.is_some() {
            dict.extend(dict_offset(layout.encoding, &[16]));
        }
        dict.extend(dict_offset(layout.char_strings, &[17]));
        if self.cid.is_some() {
            dict.extend(dict_offset(layout.fd_array, &[12, 36]));
            dict.extend(dict_offset(layout.fd_select, &[12, 37]));
        } else {
            dict.extend(private_op(layout.private.0, layout.private.1));
        }
        dict
    }
}

// Private DICT bytes with a `Subrs` entry pointing directly after the DICT, and the Subrs INDEX.
fn private_with_subrs(private: &[u8], subrs: &[Vec<u8>]) -> (Vec<u8>, Vec<u8>) {
    let mut dict = private.to_vec();
    if subrs.is_empty() {
        return (dict, Vec::new());
    }
    let len = dict.len() + 6;
    dict.extend(dict_offset(len, &[19]));
    (dict, index(subrs))
}
