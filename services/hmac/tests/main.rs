mod secret_providers;
mod signing;
