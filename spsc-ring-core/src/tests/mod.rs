mod concurrency;
mod handles;
