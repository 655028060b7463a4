use super::Options;
use arch::inst::Inst;

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Inst(Inst),
    Label(String),
    /// Annotation line, never indented
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub depth: usize,
    pub item: Item,
}

/// A fragment of the output listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Code(pub Vec<Line>);

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    fn single(item: Item) -> Self {
        Code(vec![Line { depth: 0, item }])
    }

    pub fn label(name: &str) -> Self {
        Self::single(Item::Label(name.to_string()))
    }

    pub fn comment(text: &str) -> Self {
        Self::single(Item::Comment(text.to_string()))
    }

    /// Nest the whole fragment one level deeper.
    pub fn indented(mut self) -> Self {
        for line in self.0.iter_mut() {
            line.depth += 1;
        }
        self
    }

    pub fn append(&mut self, other: Code) {
        self.0.extend(other.0);
    }

    pub fn lines(&self) -> &[Line] {
        &self.0
    }

    pub fn insts(&self) -> impl Iterator<Item = &Inst> {
        self.0.iter().filter_map(|line| match &line.item {
            Item::Inst(inst) => Some(inst),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|line| match &line.item {
            Item::Label(label) => Some(label.as_str()),
            _ => None,
        })
    }

    pub fn render(&self, options: &Options) -> String {
        let mut text = String::new();
        for (idx, line) in self.0.iter().enumerate() {
            let pad = " ".repeat(line.depth * options.indent);
            match &line.item {
                Item::Inst(inst) => {
                    text.push_str(&format!("{}{}\n", pad, inst));
                }
                Item::Label(label) => {
                    if line.depth == 0 && idx > 0 {
                        text.push('\n');
                    }
                    text.push_str(&format!("{}{}:\n", pad, label));
                }
                Item::Comment(comment) => {
                    if options.comments {
                        text.push_str(&format!("; {}\n", comment));
                    }
                }
            }
        }
        text
    }
}

impl From<Inst> for Code {
    fn from(inst: Inst) -> Self {
        Self::single(Item::Inst(inst))
    }
}

impl From<Vec<Inst>> for Code {
    fn from(insts: Vec<Inst>) -> Self {
        insts.into_iter().map(Code::from).collect()
    }
}

impl FromIterator<Line> for Code {
    fn from_iter<I: IntoIterator<Item = Line>>(iter: I) -> Self {
        Code(iter.into_iter().collect())
    }
}

impl FromIterator<Code> for Code {
    fn from_iter<I: IntoIterator<Item = Code>>(iter: I) -> Self {
        let mut code = Code::new();
        for fragment in iter {
            code.append(fragment);
        }
        code
    }
}

impl IntoIterator for Code {
    type Item = Line;
    type IntoIter = std::vec::IntoIter<Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
