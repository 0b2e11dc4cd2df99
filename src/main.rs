use qa_forum::{AppState, AppConfig};
use qa_forum::db::DatabaseClient;
use qa_forum::db::repository::{MemoryQuestionRepository, QuestionRepository};
use qa_forum::routes::create_routes;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Populate the in-memory store with a few threads so the pages have content
async fn populate_sample_questions(repo: &MemoryQuestionRepository) -> qa_forum::Result<()> {
    info!("Populating in-memory store with sample questions...");

    let users = [(1, "demo"), (2, "ferris"), (3, "ada"), (4, "grace")];
    for (id, username) in users {
        repo.insert_user(id, username)?;
    }

    // (author, body, answers with their comments, votes)
    let threads: Vec<(i64, &str, Vec<(i64, &str, Vec<(i64, &str)>)>, Vec<(i64, bool)>)> = vec![
        (
            2,
            "When should I reach for Rc<RefCell<T>> instead of passing &mut around?",
            vec![(3, "Only when ownership is genuinely shared and the borrow graph is dynamic.", vec![(2, "That matches what the book says, thanks.")])],
            vec![(1, true), (3, true), (4, false)],
        ),
        (
            3,
            "How do I share a database pool between axum handlers?",
            vec![
                (4, "Put it in your state struct and derive Clone; the pool is already reference counted.", vec![]),
                (2, "Arc<PgPool> works too if you want to be explicit.", vec![(3, "Good point.")]),
            ],
            vec![(1, true), (2, true)],
        ),
        (
            4,
            "Is it ever fine to call unwrap() in production code?",
            vec![],
            vec![(2, false), (3, false)],
        ),
    ];

    let mut created = 0;
    for (author_id, body, answers, votes) in threads {
        let question = repo.create_question(author_id, body).await?;
        for (answer_author, answer_body, comments) in answers {
            let answer = repo.add_answer(question.id, answer_author, answer_body)?;
            for (comment_author, comment_body) in comments {
                repo.add_comment(answer.id, comment_author, comment_body)?;
            }
        }
        for (voter, is_up_vote) in votes {
            repo.cast_vote(voter, question.id, is_up_vote)?;
        }
        created += 1;
    }

    info!("Sample question population completed: {} questions created", created);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Q&A forum server...");

    // Load configuration from environment
    let config = AppConfig::from_env();
    info!("Server configuration loaded (listing order: {:?})", config.listing_order);

    // Initialize application state
    let app_state = match config.database_url {
        Some(_) => AppState::new(config.clone()).await?,
        None => {
            warn!("⚠️ STARTUP: DATABASE_URL not set, serving sample data from memory");
            let repo = Arc::new(MemoryQuestionRepository::new());
            populate_sample_questions(&repo).await?;
            AppState::with_database(config.clone(), DatabaseClient::from_repo(repo))
        }
    };
    info!("Application state initialized ({} store)", app_state.db.question_repo.backend());

    if config.database_url.is_none() {
        let token = app_state.auth_service.generate_token(1, "demo")?;
        info!("Demo session token for user 'demo': {}", token);
    }

    let app = create_routes(app_state);

    let addr: SocketAddr = config.server_address().parse()?;
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", config.server_address());

    axum::serve(listener, app).await?;

    Ok(())
}
