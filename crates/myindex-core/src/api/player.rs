//! Music player methods on MyIndexApi.

use crate::models::Track;
use crate::player::{is_remote_lrc, LyricLine, Lyrics, PlayOrder, PlayerStatus};
use crate::{MyIndexApi, Result};

impl MyIndexApi {
    // ========================================
    // Player
    // ========================================

    pub async fn player_status(&self) -> PlayerStatus {
        let playlist = self.store.music().await;
        let player = self.player.read().await;
        PlayerStatus::new(&player, &playlist)
    }

    pub async fn current_track(&self) -> Option<Track> {
        self.player_status().await.track
    }

    pub async fn player_select(&self, index: usize) -> Result<PlayerStatus> {
        self.player.write().await.select(index)?;
        Ok(self.player_status().await)
    }

    pub async fn player_next(&self) -> PlayerStatus {
        self.player.write().await.next();
        self.player_status().await
    }

    pub async fn player_previous(&self) -> PlayerStatus {
        self.player.write().await.previous();
        self.player_status().await
    }

    pub async fn player_set_order(&self, order: PlayOrder) -> PlayerStatus {
        self.player.write().await.set_order(order);
        self.player_status().await
    }

    pub async fn player_set_playing(&self, playing: bool) -> PlayerStatus {
        self.player.write().await.set_playing(playing);
        self.player_status().await
    }

    /// The lyric line of the current track at `position_ms`.
    ///
    /// Lyrics given as a URL are fetched once per track and kept until the
    /// track changes.
    pub async fn current_lyric(&self, position_ms: u64) -> Result<Option<LyricLine>> {
        let Some(track) = self.current_track().await else {
            return Ok(None);
        };

        let mut cached = self.lyrics.lock().await;
        let lyrics = match cached.take() {
            Some((key, lyrics)) if key == track.lrc => lyrics,
            _ => self.fetch_lyrics(&track.lrc).await?,
        };
        let line = lyrics.line_at(position_ms).cloned();
        *cached = Some((track.lrc, lyrics));
        Ok(line)
    }

    async fn fetch_lyrics(&self, lrc: &str) -> Result<Lyrics> {
        if !is_remote_lrc(lrc) {
            return Ok(Lyrics::parse(lrc));
        }
        let response = self.fetcher.get(lrc).await?.error_for_status()?;
        let lyrics = Lyrics::parse(response.text());
        tracing::debug!("Fetched {} lyric lines from {}", lyrics.lines().len(), lrc);
        Ok(lyrics)
    }
}
