mod upsert;
