//! Servidor HTTP de anotação: uma única rota na raiz que recebe texto bruto
//! no corpo e devolve o resultado do tagging.
//!
//! O formato da resposta e a política de erro são escolhas fixas por
//! deployment, nunca por requisição:
//!
//! - `--mode inline`: corpo = texto original com entidades marcadas inline.
//! - `--mode structured`: corpo = uma linha por token, `token<TAB>offset<TAB>rótulo`.
//! - `--policy reported`: falha vira status 500 com a mensagem no corpo.
//! - `--policy silent`: falha vira 200 com corpo vazio (compatibilidade com
//!   deployments legados; o chamador não distingue falha de entrada vazia).
//!
//! A carga do modelo acontece uma única vez, antes do listener abrir; se
//! falhar, o processo loga e encerra sem nunca aceitar conexões.

use std::path::PathBuf;
use std::sync::Arc;

use anotador_core::{Annotator, Tagger, TaggerModel, TaggingFailure};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use clap::{Parser, ValueEnum};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Formato do corpo da resposta em caso de sucesso
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ResponseMode {
    /// Texto original com cada entidade envolta em `[RÓTULO ...]`
    Inline,
    /// Uma linha por token: `token<TAB>offset<TAB>rótulo`
    Structured,
}

/// Como apresentar uma falha de tagging ao cliente
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ErrorPolicy {
    /// 200 com corpo vazio; a falha só aparece no log do servidor
    Silent,
    /// 500 com a mensagem da falha no corpo
    Reported,
}

#[derive(Parser, Debug)]
#[command(name = "anotador-web", about = "Serviço HTTP de anotação de entidades nomeadas")]
struct Args {
    /// Porta de escuta
    #[arg(long, default_value_t = 3000, env = "ANOTADOR_PORT")]
    port: u16,
    /// Caminho do modelo de gazetteers (JSON); usa o embutido se omitido
    #[arg(long, env = "ANOTADOR_MODEL")]
    model: Option<PathBuf>,
    /// Formato da resposta
    #[arg(long, value_enum, default_value = "inline", env = "ANOTADOR_MODE")]
    mode: ResponseMode,
    /// Política de erro
    #[arg(long, value_enum, default_value = "reported", env = "ANOTADOR_POLICY")]
    policy: ErrorPolicy,
}

/// Estado compartilhado da aplicação
///
/// O tagger é construído uma vez na inicialização e compartilhado somente
/// para leitura entre todas as requisições (o [`Annotator`] só usa `&self`).
struct AppState {
    tagger: Box<dyn Tagger>,
    mode: ResponseMode,
    policy: ErrorPolicy,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();

    // Bootstrap: o modelo carrega antes do listener abrir; falha é terminal
    let model = match &args.model {
        Some(path) => match TaggerModel::from_file(path) {
            Ok(model) => model,
            Err(err) => {
                error!("falha na inicialização: modelo {}: {}", path.display(), err);
                std::process::exit(1);
            }
        },
        None => TaggerModel::builtin(),
    };

    let state = Arc::new(AppState {
        tagger: Box::new(Annotator::new(model)),
        mode: args.mode,
        policy: args.policy,
    });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port))
        .await
        .unwrap();
    info!(
        "🚀 Servidor de anotação ouvindo na porta {} [{:?} | {:?}]",
        args.port, args.mode, args.policy
    );
    axum::serve(listener, app).await.unwrap();
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Rota única na raiz, como nos servidores de referência; o método não é
    // verificado (POST é o verbo pretendido)
    Router::new()
        .route("/", any(annotate_handler))
        .layer(cors)
        .with_state(state)
}

/// Processa uma requisição: corpo inteiro lido como UTF-8, tagger invocado,
/// resposta completa montada antes de qualquer byte ser escrito.
async fn annotate_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let text = match std::str::from_utf8(&body) {
        Ok(text) => text,
        Err(_) => return failure_response(&state, body.len(), &TaggingFailure::InvalidEncoding),
    };

    match state.tagger.tag(text) {
        Ok(annotation) => {
            let out = match state.mode {
                ResponseMode::Inline => annotation.to_inline(),
                ResponseMode::Structured => annotation.to_tsv(),
            };
            info!(
                "requisição anotada: {} bytes de entrada, {} bytes de saída",
                body.len(),
                out.len()
            );
            (StatusCode::OK, out).into_response()
        }
        Err(failure) => failure_response(&state, body.len(), &failure),
    }
}

/// Converte uma falha na resposta ditada pela política do deployment.
///
/// A falha é sempre logada com o tamanho da entrada, inclusive na política
/// silenciosa.
fn failure_response(state: &AppState, input_len: usize, failure: &TaggingFailure) -> Response {
    error!("falha ao anotar entrada de {} bytes: {}", input_len, failure);
    match state.policy {
        ErrorPolicy::Silent => (StatusCode::OK, String::new()).into_response(),
        ErrorPolicy::Reported => {
            (StatusCode::INTERNAL_SERVER_ERROR, failure.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anotador_core::Annotation;
    use axum::body::Body;
    use axum::http::{header, Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Tagger que falha sempre, para exercitar as políticas de erro
    struct FailingTagger;

    impl Tagger for FailingTagger {
        fn tag(&self, _text: &str) -> Result<Annotation, TaggingFailure> {
            Err(TaggingFailure::UnsupportedInput(0))
        }
    }

    fn builtin_router(mode: ResponseMode, policy: ErrorPolicy) -> Router {
        build_router(Arc::new(AppState {
            tagger: Box::new(Annotator::builtin()),
            mode,
            policy,
        }))
    }

    fn failing_router(policy: ErrorPolicy) -> Router {
        build_router(Arc::new(AppState {
            tagger: Box::new(FailingTagger),
            mode: ResponseMode::Inline,
            policy,
        }))
    }

    fn post(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .body(body.into())
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_inline_mode() {
        let app = builtin_router(ResponseMode::Inline, ErrorPolicy::Reported);
        let response = app
            .oneshot(post("Barack Obama was born in Hawaii."))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let expected = "[PERSON Barack Obama] was born in [LOCATION Hawaii].";
        assert_eq!(
            response.headers()[header::CONTENT_LENGTH],
            expected.len().to_string().as_str()
        );
        assert_eq!(body_string(response).await, expected);
    }

    #[tokio::test]
    async fn test_structured_mode() {
        let app = builtin_router(ResponseMode::Structured, ErrorPolicy::Reported);
        let response = app
            .oneshot(post("Barack Obama was born in Hawaii."))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines[0], "Barack\t0\tPERSON");
        assert_eq!(lines[1], "Obama\t7\tPERSON");
        assert_eq!(lines[5], "Hawaii\t25\tLOCATION");

        // toda linha tem exatamente três campos e offset não-negativo crescente
        let mut last = -1i64;
        for line in &lines {
            let fields: Vec<&str> = line.split('\t').collect();
            assert_eq!(fields.len(), 3);
            let offset: i64 = fields[1].parse().unwrap();
            assert!(offset > last);
            last = offset;
        }
    }

    #[tokio::test]
    async fn test_idempotent_responses() {
        let text = "Angela Merkel lives in Berlin.";
        let first = builtin_router(ResponseMode::Inline, ErrorPolicy::Reported)
            .oneshot(post(text))
            .await
            .unwrap();
        let second = builtin_router(ResponseMode::Inline, ErrorPolicy::Reported)
            .oneshot(post(text))
            .await
            .unwrap();
        assert_eq!(body_string(first).await, body_string(second).await);
    }

    #[tokio::test]
    async fn test_method_agnostic() {
        let app = builtin_router(ResponseMode::Inline, ErrorPolicy::Reported);
        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::from("Hawaii is nice"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_body_ok() {
        let app = builtin_router(ResponseMode::Structured, ErrorPolicy::Reported);
        let response = app.oneshot(post("")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_silent_policy_hides_failure() {
        let app = failing_router(ErrorPolicy::Silent);
        let response = app.oneshot(post("anything")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn test_reported_policy_surfaces_failure() {
        let app = failing_router(ErrorPolicy::Reported);
        let response = app.oneshot(post("anything")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_string(response).await;
        assert!(body.contains("entrada não suportada"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_follows_policy() {
        let invalid = vec![0x66, 0x6f, 0xff, 0xfe];

        let reported = failing_router(ErrorPolicy::Reported)
            .oneshot(post(invalid.clone()))
            .await
            .unwrap();
        assert_eq!(reported.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let silent = builtin_router(ResponseMode::Inline, ErrorPolicy::Silent)
            .oneshot(post(invalid))
            .await
            .unwrap();
        assert_eq!(silent.status(), StatusCode::OK);
        assert_eq!(body_string(silent).await, "");
    }

    #[tokio::test]
    async fn test_nul_input_with_real_annotator() {
        let app = builtin_router(ResponseMode::Inline, ErrorPolicy::Reported);
        let response = app.oneshot(post("abc\0def")).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
