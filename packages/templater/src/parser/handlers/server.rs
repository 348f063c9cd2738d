//! Handler for `<SMTPSERVER>` elements.

use crate::error::Result;
use crate::model::Server;
use crate::parser::handler::{ElementHandler, ParseContext, StartElement};

/// Handler for `<SMTPSERVER>`: appends an outgoing server.
pub struct SmtpServerHandler;

impl ElementHandler for SmtpServerHandler {
    fn handle(&self, element: &StartElement, context: &mut ParseContext<'_>) -> Result<()> {
        let attrs = element.attributes();
        let mut server = Server::default();

        if let Some(host) = attrs.text("SERVER") {
            server.host = host;
        }
        if let Some(port) = attrs.parse::<u16>("PORT", "a port number between 0 and 65535")? {
            server.port = port;
        }
        server.username = attrs.text("USERNAME");
        server.password = attrs.text("PASSWORD");

        context.model.smtp_servers.push(server);
        Ok(())
    }
}
