use anyhow::Result;
use caravel::cli::output::Output;
use caravel::cli::{Cli, Commands};
use caravel::rag::loader;
use caravel::{
    agents, tools, ChatSession, Config, LLMClient, Provider, RagPipeline, Retriever, TextChunker,
    ToolAgent,
};
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "caravel=debug" } else { "caravel=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .init();

    let out = Output::new(!cli.no_color);
    let mut config = Config::from_env()?;
    if let Some(corpus) = &cli.corpus {
        config.rag.corpus_path = corpus.display().to_string();
    }

    if let Err(e) = run(cli, &config, &out).await {
        out.error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli, config: &Config, out: &Output) -> caravel::Result<()> {
    let llm: Arc<dyn LLMClient> = Provider::from_config(config)?.create_client().into();

    match cli.command {
        Commands::Ask { question } => {
            let question = input_or_prompt(question, out, "What's your question?");
            let answer = llm.chat(&[caravel::types::ChatMessage::user(question)]).await?;
            out.answer(&answer);
        }

        Commands::Search { query, k } => {
            let query = input_or_prompt(query, out, "Enter the text:");
            let pipeline = build_pipeline(config, llm).await?;
            let k = k.unwrap_or(config.rag.top_k);
            for (rank, scored) in pipeline.search(&query, k).await?.iter().enumerate() {
                out.chunk(
                    rank + 1,
                    scored.score,
                    &format!("{}#{}", scored.chunk.source, scored.chunk.offset),
                    &scored.chunk.text,
                );
            }
        }

        Commands::Rag { question } => {
            let question = input_or_prompt(question, out, "Enter your question:");
            let pipeline = build_pipeline(config, llm).await?;
            let answer = pipeline.answer(&question).await?;
            out.answer(&answer);
        }

        Commands::Chat { thread } => {
            let chunker = TextChunker::new(config.rag.chunk_size, config.rag.chunk_overlap)?;
            let text = loader::load_corpus(&config.rag.corpus_path)?;
            let mut retriever = Retriever::new(Arc::clone(&llm));
            retriever
                .index_chunks(chunker.split(&text, &config.rag.corpus_path))
                .await?;
            out.info(&format!(
                "Indexed {} chunks from {}",
                retriever.indexed_chunks(),
                config.rag.corpus_path
            ));

            let mut session = ChatSession::new(llm, Arc::new(retriever));
            loop {
                out.prompt("Enter your question (empty line to quit):");
                let Some(line) = read_line() else { break };
                if line.is_empty() {
                    break;
                }
                let answer = session.turn(&thread, &line).await?;
                out.answer(&answer);
            }
        }

        Commands::Agent { city } => {
            let registry = Arc::new(tools::travel_registry(&config.tools)?);
            let agent = ToolAgent::new(llm, registry);
            let result = agent.run(&agents::attractions_task(&city)).await?;
            out.answer(&result);
        }

        Commands::Plan { home, city } => {
            let registry = Arc::new(tools::travel_registry(&config.tools)?);
            let agent = ToolAgent::new(llm, registry);
            let result = agent.run(&agents::trip_plan_task(&home, &city)).await?;
            out.answer(&result);
        }
    }

    Ok(())
}

async fn build_pipeline(config: &Config, llm: Arc<dyn LLMClient>) -> caravel::Result<RagPipeline> {
    let chunker = TextChunker::new(config.rag.chunk_size, config.rag.chunk_overlap)?;
    RagPipeline::ingest(&config.rag.corpus_path, &chunker, llm, config.rag.top_k).await
}

fn input_or_prompt(input: Option<String>, out: &Output, label: &str) -> String {
    match input {
        Some(value) => value,
        None => {
            out.prompt(label);
            read_line().unwrap_or_default()
        }
    }
}

fn read_line() -> Option<String> {
    let mut line = String::new();
    match std::io::stdin().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}
