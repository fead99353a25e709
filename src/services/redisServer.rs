//This file has methods for accessing redis server
#![allow(non_snake_case, non_camel_case_types)]
#![allow(clippy::needless_return)]

use async_trait::async_trait;
use redis::AsyncCommands;

use crate::models::session::SessionClaims;
use super::sessions::{SessionError, SessionStore};

pub static DEFAULT_SESSION_EXPIRATION: usize = 600; //600 secs --> 10 minutes
pub static SESSION_KEY_PREFIX: &str = "sessionId";
pub static SESSION_USER_KEY_PREFIX: &str = "sessionUser";

#[derive(Clone)]
pub struct redisState {
    pub redisConn: Option<redis::aio::ConnectionManager>,
    pub sessionTtl: usize
}

impl Default for redisState {
    fn default() -> Self {
        return redisState::new(DEFAULT_SESSION_EXPIRATION);
    }
}

impl redisState {
    pub fn new(sessionTtl: usize) -> redisState {
        return redisState {
            redisConn: None,
            sessionTtl
        };
    }

    pub async fn connect(&mut self, redisUrl: &str) -> redis::RedisResult<()> {
        let client: redis::Client = redis::Client::open(redisUrl)?;
        self.redisConn = Some(client.get_tokio_connection_manager().await?);
        tracing::info!("connected to redis");

        return Ok(());
    }

    //ConnectionManager is cheap to clone and multiplexes over one connection
    pub fn getConnection(&self) -> Option<redis::aio::ConnectionManager> {
        return self.redisConn.clone();
    }
}

pub fn sessionKey(sessionId: &str) -> String {
    return format!("{}{}", SESSION_KEY_PREFIX, sessionId);
}

//Reverse lookup the login service keeps next to the session: username -> session id
pub fn sessionUserKey(username: &str) -> String {
    return format!("{}{}", SESSION_USER_KEY_PREFIX, username);
}

#[async_trait]
impl SessionStore for redisState {
    //Resolving a session also refreshes both of its keys, same as an active user hitting the api
    async fn resolve(&self, sessionId: &str) -> Result<Option<SessionClaims>, SessionError> {
        let mut redisConn = self.getConnection().ok_or(SessionError::NotConnected)?;
        let key = sessionKey(sessionId);

        let raw: Option<String> = redisConn.get(&key).await?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        let claims: SessionClaims = serde_json::from_str(&raw)?;
        redisConn.expire::<_, ()>(&key, self.sessionTtl).await?;
        redisConn.expire::<_, ()>(sessionUserKey(&claims.Username), self.sessionTtl).await?;

        return Ok(Some(claims));
    }
}
