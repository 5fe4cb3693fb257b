mod ngrams;
pub use self::ngrams::CharNgrams;

mod reader;
pub use self::reader::{read_conllx, ColumnLayout, ColumnReader, Row};

mod segment;
pub use self::segment::{segment, Sentences};

/// Tag of tokens that are dropped from the transformation by default.
pub const PUNCT_TAG: &str = "punct";

/// Trait defining the accessors the transformation and scoring need.
pub trait TaggedToken {
    fn form(&self) -> &str;
    fn lemma(&self) -> &str;
    fn tag(&self) -> &str;

    fn is_punct(&self) -> bool {
        self.tag() == PUNCT_TAG
    }
}

impl<'a, T> TaggedToken for &'a T
where
    T: TaggedToken + ?Sized,
{
    fn form(&self) -> &str {
        (**self).form()
    }

    fn lemma(&self) -> &str {
        (**self).lemma()
    }

    fn tag(&self) -> &str {
        (**self).tag()
    }
}

/// A (word, lemma, tag) triple of a tagged corpus.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    form: String,
    lemma: String,
    tag: String,
}

impl Token {
    pub fn new(form: impl Into<String>, lemma: impl Into<String>, tag: impl Into<String>) -> Self {
        Token {
            form: form.into(),
            lemma: lemma.into(),
            tag: tag.into(),
        }
    }

    pub fn set_form(&mut self, form: impl Into<String>) {
        self.form = form.into();
    }
}

impl TaggedToken for Token {
    fn form(&self) -> &str {
        &self.form
    }

    fn lemma(&self) -> &str {
        &self.lemma
    }

    fn tag(&self) -> &str {
        &self.tag
    }
}

/// TaggedToken for CoNLL-X tokens, missing columns read as `_`.
impl TaggedToken for conllx::token::Token {
    fn form(&self) -> &str {
        self.form()
    }

    fn lemma(&self) -> &str {
        self.lemma().unwrap_or("_")
    }

    fn tag(&self) -> &str {
        self.pos().unwrap_or("_")
    }
}

impl<'a> From<&'a conllx::token::Token> for Token {
    fn from(token: &conllx::token::Token) -> Self {
        Token::new(
            TaggedToken::form(token),
            TaggedToken::lemma(token),
            TaggedToken::tag(token),
        )
    }
}
