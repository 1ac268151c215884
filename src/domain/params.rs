// Typed arguments that end up in endpoint query strings

use std::fmt;
use std::str::FromStr;

use super::context::{ServerConnectionContext, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use super::template::BindingValue;

/// One page of a paged listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub size: u32,
    pub number: u32,
}

impl Page {
    pub fn new(size: u32, number: u32) -> Self {
        Self { size, number }
    }

    /// First page, sized by the context
    pub fn first(context: &ServerConnectionContext) -> Self {
        Self::new(context.page_size(), DEFAULT_PAGE_NUMBER)
    }

    /// The following page, or `None` once the page number cannot grow
    pub fn next(&self) -> Option<Self> {
        self.number
            .checked_add(1)
            .map(|number| Self::new(self.size, number))
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_PAGE_NUMBER)
    }
}

/// Paper size for PDF exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageType {
    A3,
    A4,
    A5,
    B5,
    Executive,
    Folio,
    Ledger,
    Legal,
    Letter,
    Note,
    Quarto,
    Tabloid,
    Unspecified,
}

impl PageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::A3 => "A3",
            PageType::A4 => "A4",
            PageType::A5 => "A5",
            PageType::B5 => "B5",
            PageType::Executive => "Executive",
            PageType::Folio => "Folio",
            PageType::Ledger => "Ledger",
            PageType::Legal => "Legal",
            PageType::Letter => "Letter",
            PageType::Note => "Note",
            PageType::Quarto => "Quarto",
            PageType::Tabloid => "Tabloid",
            PageType::Unspecified => "Unspecified",
        }
    }

    pub fn all() -> &'static [PageType] {
        use PageType::*;
        &[
            A3, A4, A5, B5, Executive, Folio, Ledger, Legal, Letter, Note, Quarto, Tabloid,
            Unspecified,
        ]
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown page type '{}'", s))
    }
}

impl BindingValue for PageType {
    fn to_binding(&self) -> String {
        self.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOrientation {
    Portrait,
    Landscape,
}

impl PageOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageOrientation::Portrait => "Portrait",
            PageOrientation::Landscape => "Landscape",
        }
    }
}

impl fmt::Display for PageOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portrait" => Ok(PageOrientation::Portrait),
            "landscape" => Ok(PageOrientation::Landscape),
            _ => Err(format!("unknown page orientation '{}'", s)),
        }
    }
}

impl BindingValue for PageOrientation {
    fn to_binding(&self) -> String {
        self.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::version::{Protocol, ServerVersion};

    #[test]
    fn test_default_page() {
        assert_eq!(Page::default(), Page::new(1000, 1));
    }

    #[test]
    fn test_first_page_uses_context_size() {
        let ctx =
            ServerConnectionContext::new(Protocol::Https, "host", "", ServerVersion::Server9, 50)
                .unwrap();
        let page = Page::first(&ctx);
        assert_eq!(page, Page::new(50, 1));
        assert_eq!(page.next(), Some(Page::new(50, 2)));
    }

    #[test]
    fn test_next_stops_at_last_page_number() {
        assert_eq!(Page::new(10, u32::MAX).next(), None);
        assert_eq!(Page::new(10, u32::MAX - 1).next(), Some(Page::new(10, u32::MAX)));
    }

    #[test]
    fn test_page_type_parse() {
        assert_eq!("letter".parse::<PageType>().unwrap(), PageType::Letter);
        assert_eq!(PageType::A4.to_binding(), "A4");
        assert!("A0".parse::<PageType>().is_err());
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("Landscape".parse::<PageOrientation>().unwrap(), PageOrientation::Landscape);
        assert_eq!(PageOrientation::Portrait.to_binding(), "Portrait");
        assert!("sideways".parse::<PageOrientation>().is_err());
    }
}
