//! Compiler and linker flag tokens.
//!
//! Composed flag groups are sequences of fragments. A fragment is either
//! **typed** — a single type character plus data, covering the flags this
//! tool classifies (`-I` include paths, `-L` search paths, `-l` library
//! names) — or **untyped**, a bare token passed through verbatim
//! (`-fomit-frame-pointer`, a CPU flag, a startup-object path).
//!
//! Fragment lists preserve exactly what was pushed into them: order is the
//! composition order and duplicates are kept, because both are part of the
//! output contract.

/// A single compiler or linker flag token.
///
/// `-I/src/soc/software/include` has type `'I'` and data
/// `"/src/soc/software/include"`; `-lbase` has type `'l'` and data
/// `"base"`; `-nostdlib` is untyped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// The type character, or `'\0'` for untyped tokens.
    frag_type: char,

    /// The data carried by this fragment (path, library name, or the whole
    /// token when untyped).
    pub data: String,
}

impl Fragment {
    /// Create a typed fragment.
    pub fn new(frag_type: char, data: impl Into<String>) -> Self {
        Self {
            frag_type,
            data: data.into(),
        }
    }

    /// Create an untyped fragment.
    pub fn untyped(data: impl Into<String>) -> Self {
        Self {
            frag_type: '\0',
            data: data.into(),
        }
    }

    /// The type character, or `None` if untyped.
    pub fn frag_type(&self) -> Option<char> {
        if self.frag_type == '\0' {
            None
        } else {
            Some(self.frag_type)
        }
    }

    /// Whether this is an include-path fragment (`-I`).
    pub fn is_include(&self) -> bool {
        self.frag_type == 'I'
    }

    /// Whether this is a library-search-path fragment (`-L`).
    pub fn is_lib_path(&self) -> bool {
        self.frag_type == 'L'
    }

    /// Whether this is a library-name fragment (`-l`).
    pub fn is_lib_name(&self) -> bool {
        self.frag_type == 'l'
    }

    /// Render this fragment as a flag string.
    pub fn render(&self) -> String {
        if self.frag_type == '\0' {
            self.data.clone()
        } else {
            format!("-{}{}", self.frag_type, self.data)
        }
    }
}

impl std::fmt::Display for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// An ordered list of flag fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentList {
    fragments: Vec<Fragment>,
}

impl FragmentList {
    /// Create an empty fragment list.
    pub fn new() -> Self {
        Self {
            fragments: Vec::new(),
        }
    }

    /// Split a flags string on whitespace and classify each token.
    ///
    /// Used for multi-token variable values such as `CPUFLAGS`. Tokens of
    /// the form `-I…`, `-L…`, `-l…` become typed fragments; everything else
    /// is untyped. There is no quoting in the variable file, so none is
    /// handled here.
    pub fn parse(input: &str) -> Self {
        input.split_whitespace().map(classify_token).collect()
    }

    /// Append a fragment.
    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Append all fragments from another list.
    pub fn append(&mut self, other: &FragmentList) {
        self.fragments.extend(other.fragments.iter().cloned());
    }

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Iterate over the fragments.
    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter()
    }

    /// Render all fragments joined by the given delimiter.
    pub fn render(&self, delimiter: char) -> String {
        self.fragments
            .iter()
            .map(|f| f.render())
            .collect::<Vec<_>>()
            .join(&delimiter.to_string())
    }
}

fn classify_token(token: &str) -> Fragment {
    if token.len() > 2 && token.starts_with('-') {
        let type_char = token.as_bytes()[1] as char;
        if matches!(type_char, 'I' | 'L' | 'l') {
            return Fragment::new(type_char, &token[2..]);
        }
    }
    Fragment::untyped(token)
}

impl IntoIterator for FragmentList {
    type Item = Fragment;
    type IntoIter = std::vec::IntoIter<Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.into_iter()
    }
}

impl<'a> IntoIterator for &'a FragmentList {
    type Item = &'a Fragment;
    type IntoIter = std::slice::Iter<'a, Fragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.fragments.iter()
    }
}

impl FromIterator<Fragment> for FragmentList {
    fn from_iter<I: IntoIterator<Item = Fragment>>(iter: I) -> Self {
        Self {
            fragments: iter.into_iter().collect(),
        }
    }
}
