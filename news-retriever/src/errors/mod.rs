pub mod retriever_error;
