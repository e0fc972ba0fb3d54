mod encryption_endpoints;
