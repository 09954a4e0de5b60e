use chrono::{DateTime, Utc};

/// Horizontal paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub(crate) fn as_ooxml(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A span of text sharing one set of character properties.
///
/// A `\n` inside the text is written as a line break.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Font size in points
    pub size_pt: Option<u32>,
}

impl Run {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A run holding a single line break
    pub fn line_break() -> Self {
        Self::text("\n")
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn size(mut self, points: u32) -> Self {
        self.size_pt = Some(points);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    pub alignment: Option<Alignment>,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn with_run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn push(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Concatenated text of all runs
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A top-level body element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Heading styled `Heading1`..`Heading3`
    Heading { level: u8, text: String },
    Paragraph(Paragraph),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    /// Core property `dc:title`
    pub title: Option<String>,
    /// Core property `dc:creator`
    pub creator: Option<String>,
    /// Core property `dcterms:created`
    pub created: Option<DateTime<Utc>>,
    pub body: Vec<Block>,
    /// Paragraph repeated at the bottom of every page
    pub footer: Option<Paragraph>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(Block::Paragraph(paragraph));
    }

    pub fn extend(&mut self, blocks: impl IntoIterator<Item = Block>) {
        self.body.extend(blocks);
    }
}
