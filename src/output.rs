use std::io::Write;

use anyhow::Result;
use log::debug;

use crate::keygen::HexString;
use crate::Error;

/// Somewhere to put the key besides stdout.
pub trait Clipboard {
    fn set_clipboard_text(&mut self, text: &str) -> Result<()>;
}

/// The desktop clipboard, via arboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_clipboard_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// Which destination receives the key first when both are used.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EmitOrder {
    #[default]
    ClipboardFirst,
    StdoutFirst,
}

pub struct OutputSink<W, C> {
    out: W,
    clipboard: C,
    order: EmitOrder,
}

impl<W: Write, C: Clipboard> OutputSink<W, C> {
    pub fn new(out: W, clipboard: C) -> Self {
        OutputSink { out, clipboard, order: EmitOrder::default() }
    }

    pub fn with_order(mut self, order: EmitOrder) -> Self {
        self.order = order;
        self
    }

    pub fn emit(&mut self, hex: &HexString, to_clipboard: bool) -> Result<(), Error> {
        match (to_clipboard, self.order) {
            (false, _) => self.write_stdout(hex),
            (true, EmitOrder::ClipboardFirst) => {
                self.copy(hex)?;
                self.write_stdout(hex)
            }
            (true, EmitOrder::StdoutFirst) => {
                self.write_stdout(hex)?;
                self.copy(hex)
            }
        }
    }

    /// The writer that receives the key and any informational text.
    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_parts(self) -> (W, C) {
        (self.out, self.clipboard)
    }

    fn write_stdout(&mut self, hex: &HexString) -> Result<(), Error> {
        writeln!(self.out, "{hex}").map_err(Error::Output)?;
        self.out.flush().map_err(Error::Output)
    }

    fn copy(&mut self, hex: &HexString) -> Result<(), Error> {
        debug!("copying key to clipboard");
        self.clipboard
            .set_clipboard_text(hex.as_str())
            .map_err(Error::Clipboard)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::keygen::generate;
    use anyhow::anyhow;
    use std::num::NonZeroUsize;

    /// In-memory clipboard, optionally failing every write.
    #[derive(Debug, Default)]
    pub(crate) struct FakeClipboard {
        pub(crate) text: Option<String>,
        pub(crate) fail: bool,
    }

    impl Clipboard for FakeClipboard {
        fn set_clipboard_text(&mut self, text: &str) -> Result<()> {
            if self.fail {
                return Err(anyhow!("no display"));
            }
            self.text = Some(text.to_string());
            Ok(())
        }
    }

    fn key() -> HexString {
        generate(NonZeroUsize::new(16).unwrap()).unwrap().to_hex()
    }

    #[test]
    fn emit_stdout_only() {
        let hex = key();
        let mut sink = OutputSink::new(Vec::new(), FakeClipboard::default());
        sink.emit(&hex, false).unwrap();
        let (out, clip) = sink.into_parts();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{hex}\n"), "key plus newline");
        assert!(clip.text.is_none(), "clipboard untouched");
    }

    #[test]
    fn emit_clipboard_matches_stdout() {
        for order in [EmitOrder::ClipboardFirst, EmitOrder::StdoutFirst] {
            let hex = key();
            let mut sink = OutputSink::new(Vec::new(), FakeClipboard::default()).with_order(order);
            sink.emit(&hex, true).unwrap();
            let (out, clip) = sink.into_parts();
            let printed = String::from_utf8(out).unwrap();
            assert_eq!(printed.trim_end_matches('\n'), clip.text.unwrap(), "{order:?}");
        }
    }

    #[test]
    fn emit_clipboard_failure_propagates() {
        let hex = key();
        let clip = FakeClipboard { fail: true, ..Default::default() };
        let mut sink = OutputSink::new(Vec::<u8>::new(), clip);
        let err = sink.emit(&hex, true).unwrap_err();
        assert!(matches!(err, Error::Clipboard(_)));
        assert_eq!(err.exit_code(), 3);
        let (out, _) = sink.into_parts();
        assert!(out.is_empty(), "clipboard first: nothing printed");

        let clip = FakeClipboard { fail: true, ..Default::default() };
        let mut sink = OutputSink::new(Vec::<u8>::new(), clip).with_order(EmitOrder::StdoutFirst);
        assert!(matches!(sink.emit(&hex, true), Err(Error::Clipboard(_))));
        let (out, _) = sink.into_parts();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{hex}\n"));
    }
}
