pub mod u100_chat_query;
