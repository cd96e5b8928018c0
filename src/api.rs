// SPDX-FileCopyrightText: 2022-2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

//! The backend's endpoints, one value per call.

use std::fmt;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::Value;
use url::Url;

use crate::{
    error::Result,
    http::{self, Body, Request},
    model::{
        ApprovalRequest, AuthResponse, Game, GameApprovalRequest, GameForm, Gift,
        GiftTransaction, LeaderboardEntry, LoginRequest, PointTransaction, RegisterRequest,
        Review, ReviewRequest, Status, User,
    },
};

#[async_trait]
pub(crate) trait Executor: Send + Sized {
    type Response: DeserializeOwned;

    async fn into_request(self) -> Result<Request>;

    async fn execute(self, client: &http::Client) -> Result<Self::Response> {
        let req = self.into_request().await?;
        client.request(req).await?.decode()
    }
}

/// A free-form confirmation. The backend sometimes answers with plain text
/// and sometimes with a JSON object carrying a `message`.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Ack(String);

impl<'de> Deserialize<'de> for Ack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self(match Value::deserialize(deserializer)? {
            Value::String(text) => text,
            Value::Null => String::new(),
            Value::Object(ref fields) if fields.get("message").is_some_and(Value::is_string) => {
                fields
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned()
            }
            other => other.to_string(),
        }))
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! get {
    ($name:ident, $path:literal, $response:ty) => {
        pub(crate) struct $name;

        #[async_trait]
        impl Executor for $name {
            type Response = $response;

            async fn into_request(self) -> Result<Request> {
                Ok(Request::get($path))
            }
        }
    };
}

pub(crate) struct Register<'req>(pub(crate) &'req RegisterRequest);

#[async_trait]
impl<'req> Executor for Register<'req> {
    type Response = AuthResponse;

    async fn into_request(self) -> Result<Request> {
        Request::post("/auth/register").with_json(self.0)
    }
}

pub(crate) struct Login(pub(crate) LoginRequest);

#[async_trait]
impl Executor for Login {
    type Response = AuthResponse;

    async fn into_request(self) -> Result<Request> {
        Request::post("/auth/login").with_json(&self.0)
    }
}

get!(PendingUsers, "/admin/pending", Vec<User>);
get!(PendingGames, "/admin/games/pending", Vec<Game>);
get!(AllUsers, "/admin/users/all", Vec<User>);
get!(AllGames, "/admin/games/all", Vec<Game>);
get!(PublicGames, "/games/public", Vec<Game>);
get!(MyGames, "/games/my-games", Vec<Game>);
get!(Leaderboard, "/leaderboard", Vec<LeaderboardEntry>);
get!(Gifts, "/gifts", Vec<Gift>);

pub(crate) struct ApproveUser {
    pub(crate) user_id: u64,
    pub(crate) status: Status,
}

#[async_trait]
impl Executor for ApproveUser {
    type Response = Ack;

    async fn into_request(self) -> Result<Request> {
        Request::post("/admin/approve").with_json(&ApprovalRequest {
            user_id: self.user_id,
            status: self.status,
        })
    }
}

pub(crate) struct ApproveGame {
    pub(crate) game_id: u64,
    pub(crate) status: Status,
}

#[async_trait]
impl Executor for ApproveGame {
    type Response = Ack;

    async fn into_request(self) -> Result<Request> {
        Request::post("/admin/game-approve").with_json(&GameApprovalRequest {
            game_id: self.game_id,
            status: self.status,
        })
    }
}

pub(crate) struct DeleteUser {
    pub(crate) user_id: u64,
}

#[async_trait]
impl Executor for DeleteUser {
    type Response = Ack;

    async fn into_request(self) -> Result<Request> {
        Ok(Request::delete(format!("/admin/users/{}", self.user_id)))
    }
}

pub(crate) struct GetGame {
    pub(crate) id: u64,
}

#[async_trait]
impl Executor for GetGame {
    type Response = Game;

    async fn into_request(self) -> Result<Request> {
        Ok(Request::get(format!("/games/{}", self.id)))
    }
}

pub(crate) struct CreateGame(pub(crate) GameForm);

#[async_trait]
impl Executor for CreateGame {
    type Response = Game;

    async fn into_request(self) -> Result<Request> {
        Ok(Request::post("/games/create")
            .with_body(Body::Multipart(self.0.into_multipart().await?)))
    }
}

pub(crate) struct UpdateGame {
    pub(crate) id: u64,
    pub(crate) form: GameForm,
}

#[async_trait]
impl Executor for UpdateGame {
    type Response = Game;

    async fn into_request(self) -> Result<Request> {
        Ok(Request::put(format!("/games/{}", self.id))
            .with_body(Body::Multipart(self.form.into_multipart().await?)))
    }
}

pub(crate) struct DeleteGame {
    pub(crate) id: u64,
}

#[async_trait]
impl Executor for DeleteGame {
    type Response = Ack;

    async fn into_request(self) -> Result<Request> {
        Ok(Request::delete(format!("/games/{}", self.id)))
    }
}

pub(crate) struct GameReviews {
    pub(crate) game_id: u64,
}

#[async_trait]
impl Executor for GameReviews {
    type Response = Vec<Review>;

    async fn into_request(self) -> Result<Request> {
        Ok(Request::get(format!("/reviews/{}", self.game_id)))
    }
}

pub(crate) struct SubmitReview(pub(crate) ReviewRequest);

#[async_trait]
impl Executor for SubmitReview {
    type Response = Review;

    async fn into_request(self) -> Result<Request> {
        Request::post("/reviews").with_json(&self.0)
    }
}

pub(crate) struct PlayerPoints {
    pub(crate) player_id: u64,
}

#[async_trait]
impl Executor for PlayerPoints {
    type Response = Vec<PointTransaction>;

    async fn into_request(self) -> Result<Request> {
        Ok(Request::get(format!("/points/player/{}", self.player_id)))
    }
}

pub(crate) struct RedeemGift {
    pub(crate) player_id: u64,
    pub(crate) gift_id: u64,
}

#[async_trait]
impl Executor for RedeemGift {
    type Response = GiftTransaction;

    async fn into_request(self) -> Result<Request> {
        Ok(Request::post("/gifts/redeem")
            .with_query("playerId", self.player_id)
            .with_query("giftId", self.gift_id))
    }
}

pub(crate) struct GiftTransactions {
    pub(crate) player_id: u64,
}

#[async_trait]
impl Executor for GiftTransactions {
    type Response = Vec<GiftTransaction>;

    async fn into_request(self) -> Result<Request> {
        Ok(Request::get("/gifts/transactions").with_query("playerId", self.player_id))
    }
}

/// Records a download (awarding points when the game supports them) and
/// yields the asset URL the backend redirects to.
pub(crate) struct TrackDownload {
    pub(crate) player_id: u64,
    pub(crate) game_id: u64,
}

impl TrackDownload {
    pub(crate) async fn execute(self, client: &http::Client) -> Result<Url> {
        client
            .locate(
                Request::get("/points/track-download")
                    .with_query("playerId", self.player_id)
                    .with_query("gameId", self.game_id),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wiremock::{
        matchers::{body_json, body_string_contains, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;
    use crate::http::tests::{base_url, Fixed};

    fn client(server: &MockServer) -> Result<http::Client> {
        http::Client::new(base_url(server), Arc::new(Fixed("admin-token")))
    }

    #[test]
    fn ack_accepts_text_and_message_objects() -> Result<()> {
        assert_eq!(
            serde_json::from_value::<Ack>(Value::String("User approved".to_owned()))?.to_string(),
            "User approved"
        );
        assert_eq!(
            serde_json::from_value::<Ack>(serde_json::json!({"message": "Game rejected"}))?
                .to_string(),
            "Game rejected"
        );
        assert_eq!(
            serde_json::from_value::<Ack>(serde_json::json!({"ok": true}))?.to_string(),
            r#"{"ok":true}"#
        );
        Ok(())
    }

    #[tokio::test]
    async fn path_parameters() -> Result<()> {
        assert_eq!(GetGame { id: 7 }.into_request().await?.path(), "/games/7");
        assert_eq!(
            GameReviews { game_id: 7 }.into_request().await?.path(),
            "/reviews/7"
        );
        assert_eq!(
            PlayerPoints { player_id: 5 }.into_request().await?.path(),
            "/points/player/5"
        );
        let delete = DeleteUser { user_id: 3 }.into_request().await?;
        assert_eq!(delete.path(), "/admin/users/3");
        assert_eq!(delete.method(), reqwest::Method::DELETE);
        Ok(())
    }

    #[tokio::test]
    async fn approve_user() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/admin/approve"))
            .and(body_json(serde_json::json!({"userId": 4, "status": "APPROVED"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("User status updated"))
            .expect(1)
            .mount(&server)
            .await;

        let ack = ApproveUser {
            user_id: 4,
            status: Status::Approved,
        }
        .execute(&client(&server)?)
        .await?;
        assert_eq!(ack.to_string(), "User status updated");
        Ok(())
    }

    #[tokio::test]
    async fn approve_game() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/admin/game-approve"))
            .and(body_json(serde_json::json!({"gameId": 7, "status": "REJECTED"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("Game status updated"))
            .expect(1)
            .mount(&server)
            .await;

        let _ = ApproveGame {
            game_id: 7,
            status: Status::Rejected,
        }
        .execute(&client(&server)?)
        .await?;
        Ok(())
    }

    #[tokio::test]
    async fn public_games() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/games/public"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "name": "Star Miner", "status": "APPROVED", "developerId": 3,
                 "supportLeaderboard": true, "supportPoints": true},
                {"id": 2, "name": "Moon Golf", "status": "APPROVED"}
            ])))
            .mount(&server)
            .await;

        let games = PublicGames.execute(&client(&server)?).await?;
        assert_eq!(
            games.iter().map(|game| game.name.as_str()).collect::<Vec<_>>(),
            ["Star Miner", "Moon Golf"]
        );
        assert_eq!(games[1].developer_id, None);
        Ok(())
    }

    #[tokio::test]
    async fn create_game_uploads_form_fields() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/games/create"))
            .and(body_string_contains("name=\"apkFileUrl\""))
            .and(body_string_contains("https://cdn.test/star.apk"))
            .and(body_string_contains("filename=\"star.png\""))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 11, "name": "Star Miner", "status": "PENDING",
                "apiKeyMessage": "Your API key will be issued after approval"
            })))
            .expect(1)
            .mount(&server)
            .await;
        let dir = tempfile::tempdir()?;
        let image = dir.path().join("star.png");
        std::fs::write(&image, b"PNG preview")?;

        let game = CreateGame(GameForm {
            name: "Star Miner".to_owned(),
            description: "Dig for stars".to_owned(),
            requirements: "Android 10".to_owned(),
            apk_file_url: "https://cdn.test/star.apk".to_owned(),
            support_leaderboard: true,
            support_points: true,
            preview_image: Some(image),
        })
        .execute(&client(&server)?)
        .await?;

        assert_eq!(game.status, Status::Pending);
        assert!(game.api_key_message.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn delete_game_accepts_empty_body() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v1/games/11"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let ack = DeleteGame { id: 11 }.execute(&client(&server)?).await?;
        assert_eq!(ack, Ack::default());
        Ok(())
    }

    #[tokio::test]
    async fn track_download_follows_nothing() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/points/track-download"))
            .and(query_param("playerId", "5"))
            .and(query_param("gameId", "7"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("Location", "https://cdn.test/star.apk"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let url = TrackDownload {
            player_id: 5,
            game_id: 7,
        }
        .execute(&client(&server)?)
        .await?;
        assert_eq!(url.as_str(), "https://cdn.test/star.apk");
        Ok(())
    }

    #[tokio::test]
    async fn redeem_gift_uses_query_parameters() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/gifts/redeem"))
            .and(query_param("playerId", "5"))
            .and(query_param("giftId", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 40, "playerId": 5, "giftId": 2, "pointsSpent": 100,
                "createdAt": "2024-05-02T08:00:00"
            })))
            .mount(&server)
            .await;

        let tx = RedeemGift {
            player_id: 5,
            gift_id: 2,
        }
        .execute(&client(&server)?)
        .await?;
        assert_eq!(tx.points_spent, 100);
        Ok(())
    }

    #[tokio::test]
    async fn insufficient_points_surface_server_message() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/gifts/redeem"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"message": "Insufficient points"})),
            )
            .mount(&server)
            .await;

        let err = RedeemGift {
            player_id: 5,
            gift_id: 2,
        }
        .execute(&client(&server)?)
        .await
        .err();
        assert_eq!(
            err.map(|e| e.to_string()).as_deref(),
            Some("Insufficient points")
        );
        Ok(())
    }
}
