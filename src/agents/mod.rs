//! Tool-calling agent.
//!
//! A bounded request/act/observe loop: the model is asked to either call one
//! of the registered tools or produce a final answer; tool observations are
//! fed back as tool messages until the model answers (or the step budget
//! runs out). Multi-step behavior such as "keep only attractions within 60
//! driving minutes" lives in the task text and the model's reasoning, not in
//! deterministic code.

use crate::llm::LLMClient;
use crate::tools::ToolRegistry;
use crate::types::{AppError, ChatMessage, Result};
use serde_json::Value;
use std::sync::Arc;

const AGENT_SYSTEM_PROMPT: &str = "You are a helpful assistant. \
Use the available tools to gather facts before answering. \
Call tools one step at a time and base each step on the observations so far. \
When you have everything you need, reply with the final answer instead of calling more tools.";

/// Default cap on request/act/observe iterations per task.
pub const DEFAULT_MAX_STEPS: usize = 15;

/// Runs a task against a registry of tools until the model stops calling
/// them.
pub struct ToolAgent {
    llm: Arc<dyn LLMClient>,
    registry: Arc<ToolRegistry>,
    max_steps: usize,
}

impl ToolAgent {
    pub fn new(llm: Arc<dyn LLMClient>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            llm,
            registry,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Run the loop for one natural-language task and return the final
    /// answer.
    ///
    /// # Errors
    ///
    /// Fails when the model call fails or when the step budget is exhausted
    /// before the model produces an answer.
    pub async fn run(&self, task: &str) -> Result<String> {
        let tools = self.registry.definitions();
        let mut messages = vec![
            ChatMessage::system(AGENT_SYSTEM_PROMPT),
            ChatMessage::user(task),
        ];

        for step in 0..self.max_steps {
            let response = self.llm.chat_with_tools(&messages, &tools).await?;

            if !response.has_tool_calls() {
                tracing::info!(step, "agent produced final answer");
                return Ok(response.content);
            }

            messages.push(ChatMessage::assistant_with_tool_calls(
                response.content,
                response.tool_calls.clone(),
            ));

            for call in response.tool_calls {
                let observation = match self.registry.execute(&call.name, call.arguments.clone()).await
                {
                    Ok(Value::String(text)) => text,
                    Ok(value) => value.to_string(),
                    // Unknown tools and tool failures become observations the
                    // model can react to, not aborts.
                    Err(e) => format!("Tool error: {}", e),
                };
                tracing::info!(step, tool = %call.name, "executed tool");
                messages.push(ChatMessage::tool(call.id, observation));
            }
        }

        Err(AppError::Internal(format!(
            "Agent did not produce a final answer within {} steps",
            self.max_steps
        )))
    }
}

/// Task for a two-attraction city guide driven by current weather.
pub fn attractions_task(city: &str) -> String {
    format!(
        "First, call the 'get_weather' tool to get the current weather for {city}. \
         Based on that weather and your own knowledge of the city's attractions, \
         pick the top two attractions to visit today. Then call the 'wiki_summary' \
         tool for each to give a 3-line summary."
    )
}

/// Task for a trip plan filtered by driving time from home.
pub fn trip_plan_task(home_address: &str, city: &str) -> String {
    format!(
        "Step 1: Call 'get_weather' for {city}.\n\
         Step 2: Based on the weather and your knowledge of {city}, suggest 5 attractions in the city that would be good to visit today.\n\
         Step 3: For each attraction, call 'get_drive_time_minutes' with input formatted as '{home_address}, {city}|<attraction>, {city}'.\n\
         Step 4: Keep only those with a driving time of 60 minutes or less.\n\
         Step 5: If fewer than 2 attractions qualify, suggest additional attractions and check again until you have at least 2 that meet the requirement.\n\
         Step 6: Once you have 2 qualifying attractions, call 'wiki_summary' for each (3-line summary).\n\
         Step 7: Return the weather, the two chosen attractions, their travel times, and the Wikipedia summaries."
    )
}
