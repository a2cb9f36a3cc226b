mod config;

use std::sync::{Arc, RwLock};

use actix_cors::Cors;
use actix_web::middleware::{Condition, Logger};
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use log::{error, info};
use serde::Deserialize;

use rs_markov_core::io::list_corpora;
use rs_markov_core::{generate_with, Error, GenerationPolicy, TrigramModel};

use config::Config;

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	initial: Option<String>,
	char_limit: Option<usize>,
	max_words: Option<usize>,
	nb_try: Option<usize>,
	reject_training: Option<bool>,
}

#[derive(Deserialize)]
struct CorpusQuery {
	names: Option<String>,
}

impl GenerateParams {
	/// Builds the generation policy, starting from the defaults.
	fn policy(&self) -> Result<GenerationPolicy, Error> {
		let mut policy = GenerationPolicy::default();
		if let Some(char_limit) = self.char_limit {
			policy.set_char_limit(char_limit);
		}
		if let Some(max_words) = self.max_words {
			policy.set_max_words(max_words)?;
		}
		if let Some(nb_try) = self.nb_try {
			policy.set_nb_try(nb_try)?;
		}
		policy.reject_training_lines = self.reject_training.unwrap_or(false);
		Ok(policy)
	}
}

/// A trained model and the corpora it was trained on.
struct LoadedModel {
	model: TrigramModel,
	corpus_names: Vec<String>,
}

impl LoadedModel {
	fn empty() -> Self {
		Self { model: TrigramModel::default(), corpus_names: Vec::new() }
	}
}

/// Application state.
///
/// The lock only guards swapping models. Handlers clone the `Arc` and
/// release the lock before generating, so generation reads the model
/// without holding any lock.
struct SharedData {
	config: Config,
	loaded: RwLock<Arc<LoadedModel>>,
}

impl SharedData {
	fn current(&self) -> Option<Arc<LoadedModel>> {
		self.loaded.read().ok().map(|loaded| Arc::clone(&*loaded))
	}
}

/// Trains a fresh model from `<data_dir>/<name>.txt` for each name.
///
/// Every name is checked before any file is read.
fn load_corpora(config: &Config, names: &[String]) -> Result<LoadedModel, Error> {
	let paths = names.iter().map(|name| config.corpus_path(name)).collect::<Result<Vec<_>, _>>()?;
	let model = TrigramModel::from_files(paths)?;
	Ok(LoadedModel { model, corpus_names: names.to_vec() })
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates one text from the loaded model. Each request draws from its
/// own thread-local random source.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let policy = match query.policy() {
		Ok(p) => p,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};

	let loaded = match data.current() {
		Some(l) => l,
		None => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	if loaded.model.is_empty() {
		return HttpResponse::ServiceUnavailable().body("No corpus loaded");
	}

	match generate_with(&loaded.model, &policy, query.initial.as_deref(), &mut rand::rng()) {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<SharedData>) -> impl Responder {
	match list_corpora(&data.config.data_dir, "txt") {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(e) => {
			error!("Failed to list corpora: {e}");
			HttpResponse::InternalServerError().body("Failed to list corpora")
		}
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<SharedData>) -> impl Responder {
	match data.current() {
		Some(loaded) => HttpResponse::Ok().body(loaded.corpus_names.join("\n")),
		None => HttpResponse::InternalServerError().body("Model lock failed"),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<SharedData>) -> impl Responder {
	match data.current() {
		Some(loaded) => HttpResponse::Ok().json(loaded.model.stats()),
		None => HttpResponse::InternalServerError().body("Model lock failed"),
	}
}

/// HTTP PUT endpoint `/v1/load_corpora?names=a,b`
///
/// Trains a new model from the named corpora on the blocking pool, then
/// swaps it in. Requests already generating keep the previous model.
#[put("/v1/load_corpora")]
async fn put_corpora(data: web::Data<SharedData>, query: web::Query<CorpusQuery>) -> impl Responder {
	let names: Vec<String> = match &query.names {
		Some(s) if !s.trim().is_empty() => s
			.split(',')
			.map(|s| s.trim())
			.filter(|s| !s.is_empty())
			.map(str::to_owned)
			.collect(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let config = data.config.clone();
	let loaded = match web::block(move || load_corpora(&config, &names)).await {
		Ok(Ok(l)) => l,
		Ok(Err(e @ Error::InvalidCorpusName(_))) => return HttpResponse::BadRequest().body(e.to_string()),
		Ok(Err(e)) => return HttpResponse::InternalServerError().body(format!("Failed to load corpora: {e}")),
		Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load corpora: {e}")),
	};

	info!("Loaded corpora: {}", loaded.corpus_names.join(", "));
	match data.loaded.write() {
		Ok(mut current) => *current = Arc::new(loaded),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	}

	HttpResponse::Ok().body("Corpora loaded successfully")
}

/// Main entry point for the server.
///
/// Reads the configuration, trains on the startup corpora if any, and
/// serves the generation endpoints.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = Config::parse();
	let loaded = if config.corpora.is_empty() {
		info!("No startup corpus, waiting for /v1/load_corpora");
		LoadedModel::empty()
	} else {
		load_corpora(&config, &config.corpora).map_err(|e| std::io::Error::other(e.to_string()))?
	};

	let bind = (config.host.clone(), config.port);
	let cors = config.cors;
	let shared_data = web::Data::new(SharedData { config, loaded: RwLock::new(Arc::new(loaded)) });

	info!("Listening on {}:{}", bind.0, bind.1);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Condition::new(cors, Cors::permissive()))
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(get_loaded_corpora)
			.service(get_stats)
			.service(put_corpora)
	})
		.bind(bind)?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;
	use std::fs;
	use std::path::{Path, PathBuf};

	fn shared(config: Config, model: TrigramModel) -> web::Data<SharedData> {
		let loaded = LoadedModel { model, corpus_names: vec!["test".to_owned()] };
		web::Data::new(SharedData { config, loaded: RwLock::new(Arc::new(loaded)) })
	}

	fn data_dir(name: &str) -> PathBuf {
		let dir = std::env::temp_dir().join(format!("rs-markov-server-{name}-{}", std::process::id()));
		let _ = fs::remove_dir_all(&dir);
		fs::create_dir_all(&dir).unwrap();
		dir
	}

	fn config_for(dir: &Path) -> Config {
		Config::parse_from(["rs-markov-server", "--data-dir", dir.to_str().unwrap()])
	}

	#[actix_web::test]
	async fn generates_from_the_loaded_model() {
		let data = shared(Config::parse_from(["rs-markov-server"]), TrigramModel::train(["the cat sat", "the cat ran"]));
		let app = test::init_service(App::new().app_data(data).service(get_generated)).await;

		let req = test::TestRequest::get().uri("/v1/generate?initial=the").to_request();
		let body = test::call_and_read_body(&app, req).await;
		let text = std::str::from_utf8(&body).unwrap();
		assert!(text == "the cat sat" || text == "the cat ran", "{text}");
	}

	#[actix_web::test]
	async fn rejects_invalid_policy() {
		let data = shared(Config::parse_from(["rs-markov-server"]), TrigramModel::train(["a b"]));
		let app = test::init_service(App::new().app_data(data).service(get_generated)).await;

		let req = test::TestRequest::get().uri("/v1/generate?max_words=0").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

		let req = test::TestRequest::get().uri("/v1/generate?char_limit=2").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[actix_web::test]
	async fn empty_model_is_unavailable() {
		let data = shared(Config::parse_from(["rs-markov-server"]), TrigramModel::default());
		let app = test::init_service(App::new().app_data(data).service(get_generated)).await;

		let req = test::TestRequest::get().uri("/v1/generate").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::SERVICE_UNAVAILABLE);
	}

	#[actix_web::test]
	async fn loads_and_lists_corpora() {
		let dir = data_dir("load");
		fs::write(dir.join("news.txt"), "markets rally\nmarkets slide\n").unwrap();
		fs::write(dir.join("sports.txt"), "team wins\n").unwrap();

		let data = shared(config_for(&dir), TrigramModel::default());
		let app = test::init_service(
			App::new()
				.app_data(data)
				.service(get_corpora)
				.service(get_loaded_corpora)
				.service(get_stats)
				.service(put_corpora),
		)
		.await;

		let req = test::TestRequest::get().uri("/v1/corpora").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "news\nsports");

		let req = test::TestRequest::put().uri("/v1/load_corpora?names=news,%20sports").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/loaded_corpora").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "news\nsports");

		let req = test::TestRequest::get().uri("/v1/stats").to_request();
		let stats: rs_markov_core::ModelStats = test::call_and_read_body_json(&app, req).await;
		assert_eq!(stats.sentences, 3);

		let req = test::TestRequest::put().uri("/v1/load_corpora?names=missing").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::INTERNAL_SERVER_ERROR);

		let req = test::TestRequest::put().uri("/v1/load_corpora").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

		fs::remove_dir_all(dir).unwrap();
	}

	#[actix_web::test]
	async fn corpus_names_cannot_leave_the_data_dir() {
		let root = data_dir("traversal");
		let dir = root.join("data");
		fs::create_dir_all(&dir).unwrap();
		fs::write(root.join("secret.txt"), "do not read\n").unwrap();

		let data = shared(config_for(&dir), TrigramModel::default());
		let app = test::init_service(App::new().app_data(data).service(get_loaded_corpora).service(put_corpora)).await;

		for uri in ["/v1/load_corpora?names=../secret", "/v1/load_corpora?names=..%2Fsecret", "/v1/load_corpora?names=.."] {
			let req = test::TestRequest::put().uri(uri).to_request();
			assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST, "{uri}");
		}

		let req = test::TestRequest::get().uri("/v1/loaded_corpora").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "test");

		fs::remove_dir_all(root).unwrap();
	}
}
