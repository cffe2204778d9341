//! REST client for the blog backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;

use inkpost_core::account::model::{ContactMessage, Profile, Registration};
use inkpost_core::account::repository::{AccountApi, AuthApi};
use inkpost_core::config::ClientConfig;
use inkpost_core::error::{InkpostError, Result};
use inkpost_core::list::{ListQuery, ListResult, ListScope};
use inkpost_core::post::model::{Attachment, Post, PostDraft};
use inkpost_core::post::repository::{PostLister, PostRepository};
use inkpost_core::session::{AccessToken, SessionStore};

use crate::dto::{
    EditFetchResponse, FormResponse, ListResponse, LoginResponse, MessageResponse,
    ProfileResponse, SinglePostResponse, StatusResponse,
};

/// Client for the blog backend's REST API.
///
/// Implements the core access traits. Private calls read the bearer token
/// from the injected [`SessionStore`]; a 401 response on a private call is
/// mapped to [`InkpostError::AuthRequired`] so the application layer can
/// apply the global clear-and-redirect policy.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    session: Arc<dyn SessionStore>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordRequest<'a> {
    new_password: &'a str,
    confirm_password: &'a str,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: Arc<dyn SessionStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout(),
            session,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Builds the `Authorization` header value, or fails with
    /// `AuthRequired` before any network traffic when no session is live.
    async fn auth_header(&self) -> Result<String> {
        let token = self.session.get().await.ok_or(InkpostError::AuthRequired)?;
        Ok(format!("Bearer {}", token.reveal()))
    }

    /// Sends a request and returns the response status and body text.
    ///
    /// On private calls a 401 status short-circuits to `AuthRequired`.
    /// Non-2xx statuses are not errors by themselves: the backend reports
    /// application-level failures as JSON bodies, which callers decode.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        private: bool,
    ) -> Result<(StatusCode, String)> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| InkpostError::transport(format!("request failed: {e}")))?;

        let status = response.status();
        if private && status == StatusCode::UNAUTHORIZED {
            tracing::warn!("private endpoint answered 401, session is invalid");
            return Err(InkpostError::AuthRequired);
        }

        let body = response
            .text()
            .await
            .map_err(|e| InkpostError::transport(format!("failed to read response: {e}")))?;
        Ok((status, body))
    }

    fn decode<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
        serde_json::from_str(body)
            .map_err(|e| InkpostError::transport(format!("malformed response ({status}): {e}")))
    }
}

/// Query parameters for a list request. The search term is omitted
/// entirely when empty rather than sent as an empty-string filter.
fn list_params(query: &ListQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("page", query.page.to_string()),
        ("per_page", query.per_page.to_string()),
    ];
    if let Some(term) = query.search_term() {
        params.push(("search", term.to_string()));
    }
    params
}

/// Builds the multipart part for an image attachment, with the MIME type
/// guessed from the file name.
fn attachment_part(attachment: &Attachment) -> Result<Part> {
    let mime = mime_guess::from_path(&attachment.file_name).first_or_octet_stream();
    Part::bytes(attachment.bytes.clone())
        .file_name(attachment.file_name.clone())
        .mime_str(mime.essence_str())
        .map_err(|e| InkpostError::internal(format!("invalid attachment MIME type: {e}")))
}

fn draft_form(draft: &PostDraft, attachment: Option<&Attachment>) -> Result<Form> {
    let mut form = Form::new()
        .text("title", draft.title.clone())
        .text("content", draft.content.clone());
    if let Some(attachment) = attachment {
        form = form.part("img_file", attachment_part(attachment)?);
    }
    Ok(form)
}

#[async_trait]
impl PostLister for ApiClient {
    async fn list(&self, query: &ListQuery) -> Result<ListResult> {
        let (path, private) = match query.scope {
            ListScope::Public => ("post", false),
            ListScope::Mine => ("user/posts", true),
        };

        let mut request = self.http.get(self.endpoint(path)).query(&list_params(query));
        if private {
            request = request.header("Authorization", self.auth_header().await?);
        }

        let (status, body) = self.execute(request, private).await?;
        let parsed: ListResponse = Self::decode(status, &body)?;
        if parsed.status {
            Ok(parsed.into_result())
        } else {
            Err(InkpostError::server(
                parsed
                    .error
                    .unwrap_or_else(|| "Failed to fetch posts".to_string()),
            ))
        }
    }

    async fn by_slug(&self, slug: &str) -> Result<Post> {
        let request = self.http.get(self.endpoint(&format!("post/{slug}")));
        let (status, body) = self.execute(request, false).await?;
        let parsed: SinglePostResponse = Self::decode(status, &body)?;

        match parsed.post.into_iter().next() {
            Some(post) => Ok(post.into_post()),
            None => match parsed.error {
                Some(message) => Err(InkpostError::server(message)),
                None => Err(InkpostError::not_found("post", slug)),
            },
        }
    }
}

#[async_trait]
impl PostRepository for ApiClient {
    async fn create(&self, draft: &PostDraft, attachment: Option<&Attachment>) -> Result<()> {
        let request = self
            .http
            .post(self.endpoint("add"))
            .header("Authorization", self.auth_header().await?)
            .multipart(draft_form(draft, attachment)?);

        let (status, body) = self.execute(request, true).await?;
        let parsed: StatusResponse = Self::decode(status, &body)?;
        if parsed.status {
            Ok(())
        } else {
            Err(InkpostError::server(
                parsed
                    .error
                    .unwrap_or_else(|| "Failed to add post".to_string()),
            ))
        }
    }

    async fn fetch_for_edit(&self, id: u64) -> Result<Post> {
        let request = self
            .http
            .get(self.endpoint(&format!("edit/{id}")))
            .header("Authorization", self.auth_header().await?);

        let (status, body) = self.execute(request, true).await?;
        let parsed: EditFetchResponse = Self::decode(status, &body)?;
        match parsed.post {
            Some(post) => Ok(post.into_post()),
            None => match parsed.error {
                Some(message) => Err(InkpostError::server(message)),
                None => Err(InkpostError::not_found("post", id.to_string())),
            },
        }
    }

    async fn update(
        &self,
        id: u64,
        draft: &PostDraft,
        attachment: Option<&Attachment>,
    ) -> Result<String> {
        let request = self
            .http
            .put(self.endpoint(&format!("edit/{id}")))
            .header("Authorization", self.auth_header().await?)
            .multipart(draft_form(draft, attachment)?);

        let (status, body) = self.execute(request, true).await?;
        let parsed: MessageResponse = Self::decode(status, &body)?;
        match parsed.message {
            Some(message) => Ok(message),
            None => Err(InkpostError::server(
                parsed
                    .error
                    .unwrap_or_else(|| "Failed to update post".to_string()),
            )),
        }
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let request = self
            .http
            .delete(self.endpoint(&format!("delete/{id}")))
            .header("Authorization", self.auth_header().await?);

        let (status, body) = self.execute(request, true).await?;
        let parsed: StatusResponse = Self::decode(status, &body)?;
        if parsed.status {
            Ok(())
        } else {
            Err(InkpostError::server(
                parsed
                    .error
                    .unwrap_or_else(|| "Failed to delete post".to_string()),
            ))
        }
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AccessToken> {
        let request = self
            .http
            .post(self.endpoint("login"))
            .json(&LoginRequest { email, password });

        // Login is public: a 401 here means bad credentials, not an
        // expired session, so it must surface as a server message.
        let (status, body) = self.execute(request, false).await?;
        let parsed: LoginResponse = Self::decode(status, &body)?;
        match parsed.access_token {
            Some(token) => Ok(AccessToken::new(token)),
            None => Err(InkpostError::server(
                parsed.error.unwrap_or_else(|| "Login failed".to_string()),
            )),
        }
    }
}

#[async_trait]
impl AccountApi for ApiClient {
    async fn register(
        &self,
        registration: &Registration,
        photo: Option<&Attachment>,
    ) -> Result<()> {
        let mut form = Form::new()
            .text("name", registration.name.clone())
            .text("dob", registration.dob.clone())
            .text("place", registration.place.clone())
            .text("address", registration.address.clone())
            .text("email", registration.email.clone())
            .text("password", registration.password.clone());
        if let Some(photo) = photo {
            form = form.part("image", attachment_part(photo)?);
        }

        let request = self.http.post(self.endpoint("register")).multipart(form);
        let (status, body) = self.execute(request, false).await?;
        let parsed: FormResponse = Self::decode(status, &body)?;
        if parsed.status {
            return Ok(());
        }
        if let Some(errors) = parsed.errors {
            return Err(InkpostError::FieldErrors { errors });
        }
        Err(InkpostError::server(
            parsed
                .error
                .unwrap_or_else(|| "Registration failed!".to_string()),
        ))
    }

    async fn profile(&self) -> Result<Profile> {
        let request = self
            .http
            .get(self.endpoint("profile"))
            .header("Authorization", self.auth_header().await?);

        let (status, body) = self.execute(request, true).await?;
        let parsed: ProfileResponse = Self::decode(status, &body)?;
        match parsed.user {
            Some(user) if parsed.status => Ok(Profile {
                name: user.name,
                email: user.email,
            }),
            _ => Err(InkpostError::server(
                parsed
                    .error
                    .unwrap_or_else(|| "Failed to fetch profile".to_string()),
            )),
        }
    }

    async fn send_contact(&self, message: &ContactMessage) -> Result<String> {
        let request = self.http.post(self.endpoint("contact")).json(message);
        let (status, body) = self.execute(request, false).await?;
        let parsed: FormResponse = Self::decode(status, &body)?;
        if let Some(text) = parsed.message {
            return Ok(text);
        }
        if let Some(errors) = parsed.errors {
            return Err(InkpostError::FieldErrors { errors });
        }
        Err(InkpostError::server(
            parsed
                .error
                .unwrap_or_else(|| "Failed to send details!".to_string()),
        ))
    }

    async fn request_password_reset(&self, email: &str) -> Result<()> {
        let request = self
            .http
            .post(self.endpoint("forgot-password"))
            .json(&ForgotPasswordRequest { email });

        let (status, body) = self.execute(request, false).await?;
        let parsed: MessageResponse = Self::decode(status, &body)?;
        match parsed.error {
            Some(message) => Err(InkpostError::server(message)),
            None => Ok(()),
        }
    }

    async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<()> {
        let request = self
            .http
            .post(self.endpoint(&format!("reset-password/{token}")))
            .json(&ResetPasswordRequest {
                new_password,
                confirm_password,
            });

        let (status, body) = self.execute(request, false).await?;
        let parsed: MessageResponse = Self::decode(status, &body)?;
        match parsed.error {
            Some(message) => Err(InkpostError::server(message)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpost_core::list::ListScope;

    fn client() -> ApiClient {
        struct NoSession;

        #[async_trait]
        impl SessionStore for NoSession {
            async fn get(&self) -> Option<AccessToken> {
                None
            }
            async fn set(&self, _token: AccessToken) -> Result<()> {
                Ok(())
            }
            async fn clear(&self) -> Result<()> {
                Ok(())
            }
        }

        let config = ClientConfig {
            base_url: "http://blog.test/".to_string(),
            ..ClientConfig::default()
        };
        ApiClient::new(&config, Arc::new(NoSession))
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = client();
        assert_eq!(client.endpoint("post"), "http://blog.test/post");
        assert_eq!(client.endpoint("/user/posts"), "http://blog.test/user/posts");
    }

    #[test]
    fn test_list_params_omit_empty_search() {
        let mut query = ListQuery::new(ListScope::Public, 4);
        query.page = 2;
        let params = list_params(&query);
        assert_eq!(
            params,
            vec![("page", "2".to_string()), ("per_page", "4".to_string())]
        );

        query.search = "  cats ".to_string();
        let params = list_params(&query);
        assert_eq!(params.last(), Some(&("search", "cats".to_string())));
    }

    #[test]
    fn test_decode_malformed_body_is_transport_error() {
        let err =
            ApiClient::decode::<StatusResponse>(StatusCode::BAD_GATEWAY, "<html>oops</html>")
                .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_private_call_without_token_fails_before_network() {
        let client = client();
        let err = client.auth_header().await.unwrap_err();
        assert!(err.is_auth_failure());
    }
}
