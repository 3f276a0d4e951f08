/// A track record carrying a text blob.
///
/// The text may contain hard line breaks (a two-line subtitle card, for
/// instance); the line extractor splits on them.
pub trait Record {
    fn text(&self) -> &str;
}

impl Record for str {
    fn text(&self) -> &str {
        self
    }
}

impl Record for String {
    fn text(&self) -> &str {
        self.as_str()
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn text(&self) -> &str {
        (**self).text()
    }
}

impl<R: Record + ?Sized> Record for Box<R> {
    fn text(&self) -> &str {
        (**self).text()
    }
}
