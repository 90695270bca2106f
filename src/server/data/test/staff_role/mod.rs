mod capabilities;
