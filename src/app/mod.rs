// Application layer: the command-line caller built on top of the client.

pub mod commands;
