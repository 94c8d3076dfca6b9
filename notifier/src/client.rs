use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{Colour, CreateEmbed, ExecuteWebhook, Http, Message, Webhook};
use tracing::{debug, info};

use crate::{
    errors::NotifierError,
    traits::{Notification, Notifier},
};

pub(crate) struct DiscordClient {
    pub(crate) http: Arc<Http>,
    pub(crate) webhook: Arc<Webhook>,
}

impl DiscordClient {
    pub(crate) async fn new(webhook_url: impl Into<String>) -> Result<Self, NotifierError> {
        // webhooks carry their own token, the bot token is never used
        let client = Arc::new(Http::new(""));
        let webhook = Webhook::from_url(&client, &webhook_url.into()).await?;

        Ok(Self {
            http: client,
            webhook: Arc::new(webhook),
        })
    }

    pub(crate) async fn send_message(
        &self,
        embed: CreateEmbed,
    ) -> Result<Option<Message>, serenity::Error> {
        let builder = ExecuteWebhook::new().embed(embed);

        self.webhook.execute(self.http.clone(), true, builder).await
    }
}

/// Posts price drops to a Discord channel through a webhook.
pub struct DiscordNotifier {
    client: DiscordClient,
}

impl DiscordNotifier {
    pub async fn new(webhook_url: impl Into<String>) -> Result<Self, NotifierError> {
        Ok(Self {
            client: DiscordClient::new(webhook_url).await?,
        })
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifierError> {
        let embed = CreateEmbed::new()
            .title(&notification.title)
            .description(&notification.message)
            .colour(Colour::DARK_GREEN);

        let message = self.client.send_message(embed).await?;

        debug!("{message:?}");
        info!("Sent Discord notification '{}'", notification.title);

        Ok(())
    }
}
