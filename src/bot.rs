//! Bot instances.
//!
//! A [`Bot`] owns everything one network connection needs: its handler
//! registry, entity graph, capability flags, feature table and settings.
//! Dispatch is synchronous and runs to completion before the next line is
//! handled; callers sharing a bot across tasks wrap it in a mutex.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rookery_proto::{FeatureTable, LineRef, ParseError, sanitize_outbound, strip_line_ending};
use tracing::{Level, debug, error, info, span, trace, warn};

use crate::auth::{Authorizer, DenyAll, StaticPrivileges};
use crate::capabilities::{CapNegotiation, DEFAULT_CAPABILITIES, FeatureFlags};
use crate::config::{BotConfig, ConfigError, Settings, directives};
use crate::dispatch::{HandlerId, Predicate, Registry};
use crate::error::{HandlerError, HandlerResult};
use crate::event::{Event, Origin, ReplyTarget};
use crate::handlers;
use crate::state::{ClientId, Graph};
use crate::transport::{Transport, TransportError};

/// One bot instance.
pub struct Bot {
    name: String,
    registry: Registry,
    graph: Graph,
    flags: FeatureFlags,
    features: FeatureTable,
    caps: CapNegotiation,
    settings: Settings,
    nick: String,
    realname: String,
    command_prefix: String,
    registered: bool,
    transport: Option<Box<dyn Transport>>,
    authorizer: Arc<dyn Authorizer>,
    directives_path: Option<PathBuf>,
    whox_token: Option<String>,
    nick_retry: Option<HandlerId>,
    diagnostics: Vec<String>,
}

impl Bot {
    /// Create a bot with the core handlers registered.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut bot = Self {
            nick: name.clone(),
            name,
            registry: Registry::new(),
            graph: Graph::new(),
            flags: FeatureFlags::default(),
            features: FeatureTable::new(),
            caps: CapNegotiation::new(DEFAULT_CAPABILITIES.iter().copied()),
            settings: Settings::default(),
            realname: "rookery".to_owned(),
            command_prefix: "!".to_owned(),
            registered: false,
            transport: None,
            authorizer: Arc::new(DenyAll),
            directives_path: None,
            whox_token: None,
            nick_retry: None,
            diagnostics: Vec::new(),
        };
        handlers::register_core(&mut bot);
        bot
    }

    /// Create a bot from its configuration block.
    pub fn from_config(config: &BotConfig, directives: PathBuf) -> Self {
        let wanted = DEFAULT_CAPABILITIES
            .iter()
            .map(|c| (*c).to_owned())
            .chain(config.capabilities.iter().cloned());
        let privileges: StaticPrivileges = config.privileges.clone().into_iter().collect();

        let mut bot = Self::new(config.name.clone())
            .with_authorizer(privileges)
            .with_command_prefix(&config.command_prefix)
            .with_directives(directives);
        bot.caps = CapNegotiation::new(wanted);
        bot.realname = config.realname.clone();
        bot
    }

    pub fn with_authorizer<A: Authorizer + 'static>(mut self, authorizer: A) -> Self {
        self.authorizer = Arc::new(authorizer);
        self
    }

    pub fn with_transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Box::new(transport));
        self
    }

    pub fn with_command_prefix(mut self, prefix: &str) -> Self {
        self.command_prefix = prefix.to_owned();
        self
    }

    pub fn with_directives(mut self, path: impl Into<PathBuf>) -> Self {
        self.directives_path = Some(path.into());
        self
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The nick the bot currently uses (or is trying to register with).
    #[inline]
    pub fn nick(&self) -> &str {
        &self.nick
    }

    pub fn set_nick(&mut self, nick: &str) {
        self.nick = nick.to_owned();
    }

    #[inline]
    pub fn realname(&self) -> &str {
        &self.realname
    }

    #[inline]
    pub fn command_prefix(&self) -> &str {
        &self.command_prefix
    }

    #[inline]
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    pub(crate) fn set_registered(&mut self, registered: bool) {
        self.registered = registered;
    }

    #[inline]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    #[inline]
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    #[inline]
    pub fn flags(&self) -> &FeatureFlags {
        &self.flags
    }

    #[inline]
    pub fn flags_mut(&mut self) -> &mut FeatureFlags {
        &mut self.flags
    }

    #[inline]
    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    #[inline]
    pub fn features_mut(&mut self) -> &mut FeatureTable {
        &mut self.features
    }

    #[inline]
    pub fn caps(&self) -> &CapNegotiation {
        &self.caps
    }

    #[inline]
    pub fn caps_mut(&mut self) -> &mut CapNegotiation {
        &mut self.caps
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    #[inline]
    pub fn authorizer(&self) -> &dyn Authorizer {
        self.authorizer.as_ref()
    }

    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn directives_path(&self) -> Option<&Path> {
        self.directives_path.as_deref()
    }

    /// Token of the last extended WHO request, if one was issued.
    pub fn whox_token(&self) -> Option<&str> {
        self.whox_token.as_deref()
    }

    pub(crate) fn set_whox_token(&mut self, token: &str) {
        self.whox_token = Some(token.to_owned());
    }

    pub(crate) fn nick_retry(&self) -> Option<HandlerId> {
        self.nick_retry
    }

    pub(crate) fn set_nick_retry(&mut self, id: Option<HandlerId>) {
        self.nick_retry = id;
    }

    /// The bot's own client, once registration completed.
    pub fn me(&self) -> Option<ClientId> {
        self.graph.me()
    }

    /// Whether a nick is the bot's current nick.
    pub fn is_own_nick(&self, nick: &str) -> bool {
        self.graph.casemapping().equals(nick, &self.nick)
    }

    /// Drain diagnostics reported against log targets.
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        std::mem::take(&mut self.diagnostics)
    }

    // ------------------------------------------------------------------
    // Handler registration and dispatch
    // ------------------------------------------------------------------

    /// Subscribe a handler to a command.
    pub fn register<F>(&mut self, command: &str, predicate: Predicate, handler: F) -> HandlerId
    where
        F: Fn(&mut Bot, &Event) -> HandlerResult + Send + Sync + 'static,
    {
        let id = self.registry.register(command, predicate, Arc::new(handler));
        trace!(bot = %self.name, command, handler = %id, "Handler registered");
        id
    }

    /// Remove a handler. Safe to call from inside a running handler.
    pub fn unregister(&mut self, id: HandlerId) -> bool {
        let removed = self.registry.unregister(id);
        if removed {
            trace!(bot = %self.name, handler = %id, "Handler unregistered");
        }
        removed
    }

    /// Run every matching handler for an event, in registration order.
    ///
    /// Returns how many handlers ran. A failing handler never stops the ones
    /// after it. Directive events that no handler accepts are reported as
    /// unknown through the event's error target.
    pub fn dispatch(&mut self, event: &Event) -> usize {
        let dispatch_span = span!(
            Level::DEBUG,
            "dispatch",
            bot = %self.name,
            command = %event.command,
            origin = %event.origin,
        );
        let _enter = dispatch_span.enter();

        let mut invoked = 0;
        for sub in self.registry.snapshot(&event.command) {
            if !sub.is_active() || !sub.predicate.matches(self, event) {
                continue;
            }
            invoked += 1;
            if let Err(e) = (sub.handler)(self, event) {
                if e.is_reportable() {
                    let target = event.error.clone();
                    self.report(&target, &e.to_string());
                } else {
                    warn!(
                        command = %event.command,
                        handler = %sub.id(),
                        error = %e,
                        code = e.error_code(),
                        "Handler failed"
                    );
                }
            }
        }

        if invoked == 0 && event.origin == Origin::ConfigFile {
            let target = event.error.clone();
            self.report(&target, &format!("unknown directive: {}", event.command));
        }
        invoked
    }

    /// Dispatch an internal notification.
    pub fn dispatch_internal<I, S>(&mut self, command: &str, args: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let event = Event::internal(&self.name, command, args);
        self.dispatch(&event)
    }

    /// Feed one raw line from the network.
    ///
    /// Dispatches `server_incoming` with the raw line first, then the line's
    /// own command.
    pub fn handle_line(&mut self, raw: &str) -> Result<(), ParseError> {
        let raw = strip_line_ending(raw);
        trace!(bot = %self.name, "<-- {}", raw);

        let line = LineRef::parse(raw)?;
        let mut event = Event::from_line(&self.name, &line);
        if !event.source.nick.is_empty() {
            event.source.client = self.graph.client_id(&event.source.nick);
        }

        self.dispatch_internal("server_incoming", [raw]);
        self.dispatch(&event);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Send one line. Anything from the first CR or LF on is dropped.
    pub fn send(&mut self, line: &str) -> Result<(), TransportError> {
        let line = sanitize_outbound(line);
        let transport = self.transport.as_mut().ok_or(TransportError::NotConnected)?;
        trace!(bot = %self.name, "--> {}", line);
        transport.send_line(line)
    }

    /// Deliver a reply to a target.
    pub fn reply(&mut self, target: &ReplyTarget, text: &str) {
        match target {
            ReplyTarget::Notice(to) => {
                if let Err(e) = self.send(&format!("NOTICE {to} :{text}")) {
                    debug!(bot = %self.name, error = %e, "Reply dropped");
                }
            }
            ReplyTarget::Log(location) => info!(bot = %self.name, %location, "{}", text),
            ReplyTarget::Discard => {}
        }
    }

    /// Deliver an error report to a target. Log targets also keep the text
    /// as a diagnostic.
    pub fn report(&mut self, target: &ReplyTarget, text: &str) {
        match target {
            ReplyTarget::Log(location) => {
                error!(bot = %self.name, %location, "{}", text);
                self.diagnostics.push(format!("{location}: {text}"));
            }
            other => self.reply(other, text),
        }
    }

    // ------------------------------------------------------------------
    // Connection lifecycle
    // ------------------------------------------------------------------

    /// Attach a transport and start a fresh session.
    ///
    /// Session state from any previous connection is dropped, then
    /// `on_connect` is dispatched.
    pub fn connect<T: Transport + 'static>(&mut self, transport: T) {
        self.reset_session();
        self.transport = Some(Box::new(transport));
        if let Some(server) = &self.settings.server {
            self.nick = server.nick.clone();
        }
        info!(bot = %self.name, nick = %self.nick, "Connected");
        self.dispatch_internal("on_connect", Vec::<String>::new());
    }

    /// Detach the transport and drop session state.
    pub fn disconnect(&mut self) {
        self.transport = None;
        self.reset_session();
        info!(bot = %self.name, "Disconnected");
    }

    fn reset_session(&mut self) {
        self.graph = Graph::new();
        self.flags = FeatureFlags::default();
        self.features = FeatureTable::new();
        self.caps.reset();
        self.registered = false;
        self.whox_token = None;
        if let Some(id) = self.nick_retry.take() {
            self.registry.unregister(id);
        }
    }

    /// Announce shutdown to handlers, then disconnect.
    pub fn shutdown(&mut self) {
        self.dispatch_internal("shutting_down", Vec::<String>::new());
        self.disconnect();
    }

    // ------------------------------------------------------------------
    // Directives
    // ------------------------------------------------------------------

    /// Read a directive file and dispatch each line with config origin.
    ///
    /// Returns the diagnostics reported during the pass. Failing to open the
    /// file is the only hard error.
    pub fn load_directives(&mut self, path: &Path) -> Result<Vec<String>, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let file = path.display().to_string();
        let previous = self.take_diagnostics();

        for directive in directives::parse(&content) {
            let location = format!("{}:{}", file, directive.line_no);
            match directive.words {
                Ok(words) if !words.is_empty() => {
                    let event = Event::directive(&self.name, words, location, directive.raw);
                    self.dispatch(&event);
                }
                Ok(_) => {}
                Err(e) => self.report(&ReplyTarget::Log(location), &e.to_string()),
            }
        }

        self.dispatch_internal("config_loaded", [file.as_str()]);
        let reported = std::mem::replace(&mut self.diagnostics, previous);
        info!(bot = %self.name, file = %file, errors = reported.len(), "Directives loaded");
        Ok(reported)
    }

    /// Re-read the directive file: `clear_lists`, reload,
    /// `recalculate_privileges`.
    pub fn rehash(&mut self) -> Result<Vec<String>, ConfigError> {
        let path = self
            .directives_path
            .clone()
            .ok_or_else(|| ConfigError::Invalid(format!("bot {} has no directive file", self.name)))?;
        info!(bot = %self.name, file = %path.display(), "Rehashing");
        self.dispatch_internal("clear_lists", Vec::<String>::new());
        let reported = self.load_directives(&path)?;
        self.dispatch_internal("recalculate_privileges", Vec::<String>::new());
        Ok(reported)
    }

    /// Turn a handler error into a reportable configuration error.
    pub fn require(condition: bool, msg: impl Into<String>) -> HandlerResult {
        if condition {
            Ok(())
        } else {
            Err(HandlerError::config(msg))
        }
    }
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot")
            .field("name", &self.name)
            .field("nick", &self.nick)
            .field("registered", &self.registered)
            .field("flags", &self.flags)
            .field("clients", &self.graph.client_count())
            .field("channels", &self.graph.channel_count())
            .field("handlers", &self.registry.len())
            .finish_non_exhaustive()
    }
}
