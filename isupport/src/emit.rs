//! Sending the cached `RPL_ISUPPORT` lines to a client.

use std::convert::Infallible;

use crate::cache::ReplyCache;
use crate::consts::RPL_ISUPPORT;

/// The client connection as seen by the emitter: something that can send one
/// reply with a source, a command or numeric, and a parameter list.
pub trait ReplySink {
    type Error;

    fn send_reply(&mut self, source: &str, command: &str, params: &[&str])
    -> Result<(), Self::Error>;
}

/// Send one `RPL_ISUPPORT` reply per cached line, parameters `[nick] + line`.
///
/// Used on registration and in the `VERSION` reply. Sends nothing for an empty
/// cache. Stops at the first failed send. Returns the number of lines sent.
pub fn send_isupport<S: ReplySink + ?Sized>(
    sink: &mut S,
    server_name: &str,
    nick: &str,
    cache: &ReplyCache,
) -> Result<usize, S::Error> {
    let mut params = Vec::new();
    for batch in cache {
        params.clear();
        params.push(nick);
        params.extend(batch.params());
        sink.send_reply(server_name, RPL_ISUPPORT, &params)?;
    }
    Ok(cache.len())
}

/// Render a reply as `:source command p1 p2 :last`.
///
/// The last parameter is always written in trailing form.
#[must_use]
pub fn render_line(source: &str, command: &str, params: &[&str]) -> String {
    let mut line = String::with_capacity(
        source.len() + command.len() + params.iter().map(|p| p.len() + 2).sum::<usize>() + 2,
    );
    line.push(':');
    line.push_str(source);
    line.push(' ');
    line.push_str(command);
    if let Some((last, middle)) = params.split_last() {
        for p in middle {
            line.push(' ');
            line.push_str(p);
        }
        line.push_str(" :");
        line.push_str(last);
    }
    line
}

/// A sink that renders replies into memory.
#[derive(Debug, Clone, Default)]
pub struct LineSink {
    lines: Vec<String>,
}

impl LineSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl ReplySink for LineSink {
    type Error = Infallible;

    fn send_reply(
        &mut self,
        source: &str,
        command: &str,
        params: &[&str],
    ) -> Result<(), Self::Error> {
        self.lines.push(render_line(source, command, params));
        Ok(())
    }
}
