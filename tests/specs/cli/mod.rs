mod help;
mod run;
mod timeout;
