use howmanyouts_core::wire::{
    parse_feedback_reply, parse_name_reply, parse_round_reply, parse_scoreboard,
};
use howmanyouts_core::{ClientError, Reply, Response, ScoreScope, Ticket, Transport};
use reqwest::{Client, Method, Url};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use crate::config::Config;

type Parser = Box<dyn FnOnce(&str) -> howmanyouts_core::error::Result<Reply> + Send>;

/// Talks to the game server over HTTP.
///
/// Every call spawns a task on the runtime and returns at once; the reply is
/// pushed onto the channel handed out by [`HttpTransport::new`]. The server
/// keeps the game and player name in its session, so the client carries a
/// cookie jar and loads the index page before the session is first used.
pub struct HttpTransport {
    client: Client,
    base: Url,
    runtime: Handle,
    replies: UnboundedSender<Response>,
    session_primed: bool,
}

impl HttpTransport {
    pub fn new(
        config: &Config,
        runtime: Handle,
    ) -> reqwest::Result<(Self, UnboundedReceiver<Response>)> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout())
            .build()?;
        let (tx, rx) = mpsc::unbounded_channel();

        let transport = Self {
            client,
            base: config.server.clone(),
            runtime,
            replies: tx,
            session_primed: false,
        };
        Ok((transport, rx))
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::transport(format!("{} cannot be a base URL", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue `method` against each path in turn and parse the last body.
    /// Earlier paths are only fetched for their cookies.
    fn spawn(&self, ticket: Ticket, method: Method, paths: Vec<Vec<&str>>, parse: Parser) {
        let urls: Result<Vec<Url>, ClientError> =
            paths.iter().map(|segments| self.url(segments)).collect();
        let client = self.client.clone();
        let tx = self.replies.clone();

        self.runtime.spawn(async move {
            let outcome = match urls {
                Ok(urls) => fetch_all(&client, method, &urls).await.and_then(|body| parse(&body)),
                Err(err) => Err(err),
            };
            if let Err(err) = &outcome {
                warn!(request = ticket.request.name(), error = %err, "request failed");
            }
            if tx.send(Response::new(ticket, outcome)).is_err() {
                debug!("reply channel closed, dropping response");
            }
        });
    }
}

async fn fetch_all(client: &Client, method: Method, urls: &[Url]) -> Result<String, ClientError> {
    let mut body = String::new();
    for (i, url) in urls.iter().enumerate() {
        // Session priming requests are plain page loads
        let method = if i + 1 == urls.len() {
            method.clone()
        } else {
            Method::GET
        };
        debug!(%method, %url, "sending");
        body = client
            .request(method, url.clone())
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| ClientError::transport(e.to_string()))?
            .text()
            .await
            .map_err(|e| ClientError::transport(e.to_string()))?;
    }
    Ok(body)
}

impl Transport for HttpTransport {
    fn start_game(&mut self, ticket: Ticket) {
        // The index page resets the session, dropping any game in progress
        self.session_primed = true;
        self.spawn(
            ticket,
            Method::GET,
            vec![vec![""], vec!["game", "new"]],
            Box::new(|body| parse_round_reply(body).map(Reply::Round)),
        );
    }

    fn submit_guess(&mut self, ticket: Ticket, outs: u32) {
        let outs_text = outs.to_string();
        self.spawn(
            ticket,
            Method::POST,
            vec![vec!["game", "guess", outs_text.as_str()]],
            Box::new(move |body| parse_feedback_reply(body, outs).map(Reply::Feedback)),
        );
    }

    fn fetch_next_round(&mut self, ticket: Ticket) {
        self.spawn(
            ticket,
            Method::GET,
            vec![vec!["game", "round"]],
            Box::new(|body| parse_round_reply(body).map(Reply::Round)),
        );
    }

    fn set_player_name(&mut self, ticket: Ticket, name: &str) {
        let mut paths = vec![vec!["game", "name", name]];
        if !self.session_primed {
            paths.insert(0, vec![""]);
            self.session_primed = true;
        }
        self.spawn(
            ticket,
            Method::POST,
            paths,
            Box::new(|body| parse_name_reply(body).map(|()| Reply::NameSet)),
        );
    }

    fn fetch_hi_scores(&mut self, ticket: Ticket, scope: ScoreScope) {
        self.spawn(
            ticket,
            Method::GET,
            vec![vec!["scores", scope.path()]],
            Box::new(move |body| parse_scoreboard(body, scope).map(Reply::Scoreboard)),
        );
    }
}
