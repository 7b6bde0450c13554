mod axis_purity;
mod cli;
mod config;
mod evidence;
mod loop_convergence;
mod provisional;
mod scoring;
